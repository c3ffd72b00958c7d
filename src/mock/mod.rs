pub mod mock_parameter_source;
