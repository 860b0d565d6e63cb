mod scalar_tests;
