//! Resource balance for the active session.

/// Single resource counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Economy {
    balance: u32,
}

impl Economy {
    pub(crate) const fn new(balance: u32) -> Self {
        Self { balance }
    }

    pub(crate) const fn balance(&self) -> u32 {
        self.balance
    }

    pub(crate) fn can_afford(&self, amount: u32) -> bool {
        amount <= self.balance
    }

    pub(crate) fn add(&mut self, amount: u32) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Deducts `amount` when affordable. A failed spend leaves the balance untouched.
    pub(crate) fn spend(&mut self, amount: u32) -> bool {
        match self.balance.checked_sub(amount) {
            Some(remaining) => {
                self.balance = remaining;
                true
            }
            None => false,
        }
    }
}
