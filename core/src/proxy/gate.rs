/// One-shot execution gate.
///
/// Starts `Open`. The first failed action closes it and records why; there is
/// no way back to `Open` on the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Open,
    Closed { action: String, reason: String },
}

impl GateState {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    /// Closes the gate. Returns `true` if this transitioned from Open -> Closed.
    ///
    /// An already closed gate keeps the first failure it recorded.
    pub(crate) fn close(&mut self, action: impl Into<String>, reason: impl Into<String>) -> bool {
        if self.is_closed() {
            return false;
        }
        *self = Self::Closed {
            action: action.into(),
            reason: reason.into(),
        };
        true
    }
}
