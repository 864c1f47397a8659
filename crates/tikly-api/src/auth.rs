use secrecy::SecretString;

/// Login credentials for the device API.
///
/// The password stays wrapped in a [`SecretString`] until the login
/// sentence is written to the socket; `Debug` output redacts it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}
