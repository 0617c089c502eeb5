pub mod prompt;
pub mod recommender;
pub mod validator;
