mod serialization_tests;
