use crate::utils::error::CartError;

/// The four user-visible failure kinds. Each maps to exactly one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartFailure {
    StockExceeded,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl CartFailure {
    pub fn message(self) -> &'static str {
        match self {
            CartFailure::StockExceeded => "Quantidade solicitada fora de estoque",
            CartFailure::AddFailed => "Erro na adição do produto",
            CartFailure::RemoveFailed => "Erro na remoção do produto",
            CartFailure::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }

    pub fn from_add_error(err: &CartError) -> Self {
        match err {
            CartError::StockExceeded { .. } => CartFailure::StockExceeded,
            _ => CartFailure::AddFailed,
        }
    }

    pub fn from_update_error(err: &CartError) -> Self {
        match err {
            CartError::StockExceeded { .. } => CartFailure::StockExceeded,
            _ => CartFailure::UpdateFailed,
        }
    }
}

/// What a cart operation did. Operations never return errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A new cart value was committed.
    Committed,
    /// Nothing changed and nothing was reported.
    Unchanged,
    /// The operation was aborted and the sink was notified once.
    Rejected(CartFailure),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}
