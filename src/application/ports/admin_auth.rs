/// Gate in front of the admin surface: given a secret, allow or deny.
///
/// Implementations must not keep per-caller state; the secret is presented
/// and checked on every admin request.
pub trait AdminAuth: Send + Sync {
    fn verify(&self, secret: &str) -> bool;
}
