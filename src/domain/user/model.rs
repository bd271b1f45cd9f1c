/// User credentials record
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    /// Unique lookup key
    pub username: String,
    /// bcrypt hash, never the plain password
    pub password_hash: String,
}
