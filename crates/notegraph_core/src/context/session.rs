//! Protected-session gate.

/// Reports whether protected note titles may be revealed.
pub trait ProtectedSession {
    fn is_protected_session_available(&self) -> bool;
}

/// Fixed session state, for hosts that resolve the check up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticSession {
    pub available: bool,
}

impl StaticSession {
    /// Session where protected titles stay redacted.
    pub const LOCKED: Self = Self { available: false };
    /// Session where protected titles are shown.
    pub const UNLOCKED: Self = Self { available: true };
}

impl ProtectedSession for StaticSession {
    fn is_protected_session_available(&self) -> bool {
        self.available
    }
}

impl<F> ProtectedSession for F
where
    F: Fn() -> bool,
{
    fn is_protected_session_available(&self) -> bool {
        self()
    }
}
