//! # Ledger Storage
//!
//! Account arena, allowances, global state and the event log, with nested
//! transactions. `begin` opens a journal that records the prior value of
//! every account and allowance touched through the `*_mut`/`set_*` methods,
//! a snapshot of the globals and the event-log length. `rollback` restores
//! exactly those entries; `commit` folds the journal into its parent.
//!
//! Cost is proportional to the entries touched, not to the number of holders.

use crate::config::ConversionConfig;
use crate::domain::entities::HolderAccount;
use crate::domain::pause::PauseState;
use crate::domain::reflection::ReflectionPool;
use crate::domain::tax::TaxSchedule;
use crate::events::LedgerEvent;
use crate::holder::SettlementHolder;
use shared_types::{Address, U256};
use std::collections::{BTreeSet, HashMap};

/// Ledger-wide state, snapshotted whole on `begin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals {
    /// Administrator.
    pub owner: Address,
    /// Authorized voucher signer.
    pub voucher_signer: Address,
    /// Total supply.
    pub total_supply: U256,
    /// Tax rates and split.
    pub taxes: TaxSchedule,
    /// Reflection accumulator.
    pub reflection: ReflectionPool,
    /// Pause state machine.
    pub pause: PauseState,
    /// Addresses treated as liquidity venues.
    pub venues: BTreeSet<Address>,
    /// Conversion settings.
    pub conversion: ConversionConfig,
    /// Settlement asset custody.
    pub holder: SettlementHolder,
    /// Receives LP units from liquidity adds.
    pub liquidity_recipient: Address,
}

type AllowanceKey = (Address, Address);

#[derive(Debug)]
struct Journal {
    globals: Globals,
    accounts: HashMap<Address, Option<HolderAccount>>,
    allowances: HashMap<AllowanceKey, Option<U256>>,
    events_len: usize,
}

/// Journaled ledger storage.
#[derive(Debug)]
pub struct LedgerStorage {
    accounts: HashMap<Address, HolderAccount>,
    allowances: HashMap<AllowanceKey, U256>,
    globals: Globals,
    events: Vec<LedgerEvent>,
    journals: Vec<Journal>,
}

impl LedgerStorage {
    /// Empty storage with the given globals.
    #[must_use]
    pub fn new(globals: Globals) -> Self {
        Self {
            accounts: HashMap::new(),
            allowances: HashMap::new(),
            globals,
            events: Vec::new(),
            journals: Vec::new(),
        }
    }

    // =========================================================================
    // ACCOUNTS
    // =========================================================================

    /// Copy of the account, default if never touched.
    #[must_use]
    pub fn account(&self, address: &Address) -> HolderAccount {
        self.accounts.get(address).cloned().unwrap_or_default()
    }

    /// Balance shortcut.
    #[must_use]
    pub fn balance(&self, address: &Address) -> U256 {
        self.accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default()
    }

    /// Mutable account, journaled.
    pub fn account_mut(&mut self, address: Address) -> &mut HolderAccount {
        if let Some(journal) = self.journals.last_mut() {
            let accounts = &self.accounts;
            journal
                .accounts
                .entry(address)
                .or_insert_with(|| accounts.get(&address).cloned());
        }
        self.accounts.entry(address).or_default()
    }

    /// Replaces an account, journaled.
    pub fn put_account(&mut self, address: Address, account: HolderAccount) {
        *self.account_mut(address) = account;
    }

    /// All stored accounts.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &HolderAccount)> {
        self.accounts.iter()
    }

    // =========================================================================
    // ALLOWANCES
    // =========================================================================

    /// Allowance granted by `owner` to `spender`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Sets an allowance, journaled.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        let key = (owner, spender);
        if let Some(journal) = self.journals.last_mut() {
            let allowances = &self.allowances;
            journal
                .allowances
                .entry(key)
                .or_insert_with(|| allowances.get(&key).copied());
        }
        self.allowances.insert(key, amount);
    }

    // =========================================================================
    // GLOBALS AND EVENTS
    // =========================================================================

    /// Global state.
    #[must_use]
    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    /// Mutable global state. Covered by the snapshot taken at `begin`.
    pub fn globals_mut(&mut self) -> &mut Globals {
        &mut self.globals
    }

    /// Appends an event.
    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// Events not yet drained.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drains the log. Returns nothing while a transaction is open.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        if self.in_transaction() {
            return Vec::new();
        }
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // TRANSACTIONS
    // =========================================================================

    /// Open transaction depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.journals.len()
    }

    /// True inside `begin`..`commit`/`rollback`.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        !self.journals.is_empty()
    }

    /// Opens a (possibly nested) transaction.
    pub fn begin(&mut self) {
        self.journals.push(Journal {
            globals: self.globals.clone(),
            accounts: HashMap::new(),
            allowances: HashMap::new(),
            events_len: self.events.len(),
        });
    }

    /// Keeps the innermost transaction's changes.
    pub fn commit(&mut self) {
        let Some(child) = self.journals.pop() else {
            return;
        };
        if let Some(parent) = self.journals.last_mut() {
            for (address, prior) in child.accounts {
                parent.accounts.entry(address).or_insert(prior);
            }
            for (key, prior) in child.allowances {
                parent.allowances.entry(key).or_insert(prior);
            }
        }
    }

    /// Discards the innermost transaction's changes.
    pub fn rollback(&mut self) {
        let Some(journal) = self.journals.pop() else {
            return;
        };
        for (address, prior) in journal.accounts {
            match prior {
                Some(account) => {
                    self.accounts.insert(address, account);
                }
                None => {
                    self.accounts.remove(&address);
                }
            }
        }
        for (key, prior) in journal.allowances {
            match prior {
                Some(amount) => {
                    self.allowances.insert(key, amount);
                }
                None => {
                    self.allowances.remove(&key);
                }
            }
        }
        self.globals = journal.globals;
        self.events.truncate(journal.events_len);
    }
}
