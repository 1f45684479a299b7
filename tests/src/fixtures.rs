//! # Test Fixtures
//!
//! A deployed ledger wired to an in-memory settlement asset and a seeded
//! constant-product pair, with the settlement holder already handed to the
//! ledger.

use champ_token::prelude::*;
use shared_crypto::EthSigner;
use std::sync::Arc;

/// Exchange pair type used throughout the suite.
pub type Pair = ConstantProductExchange<InMemorySettlementAsset>;

/// Ledger type used throughout the suite.
pub type Ledger = ChampToken<Pair, InMemorySettlementAsset>;

/// Deployer and owner.
pub const OWNER: Address = Address::new([0x01; 20]);
/// The ledger's own address.
pub const LEDGER: Address = Address::new([0x77; 20]);
/// Exchange pair.
pub const PAIR: Address = Address::new([0xEE; 20]);
/// Settlement holder custody address.
pub const HOLDER: Address = Address::new([0x55; 20]);
/// Settlement asset address.
pub const SETTLEMENT: Address = Address::new([0xAA; 20]);

/// Deployment time.
pub const GENESIS: Timestamp = 1_700_000_000;

/// Tokens seeded into the pool.
pub const POOL_TOKENS: u64 = 1_000_000;
/// Settlement asset seeded into the pool.
pub const POOL_SETTLEMENT: u64 = 1_000;

/// Address with every byte set to `b`.
#[must_use]
pub fn addr(b: u8) -> Address {
    Address::new([b; 20])
}

/// `whole` tokens in 18-decimal base units.
#[must_use]
pub fn units(whole: u64) -> U256 {
    U256::from(whole) * U256::exp10(18)
}

/// Deployed ledger plus its collaborators.
pub struct Harness {
    /// The ledger under test.
    pub token: Ledger,
    /// Settlement asset.
    pub asset: Arc<InMemorySettlementAsset>,
    /// Exchange pair.
    pub exchange: Arc<Pair>,
    /// Authorized voucher signer.
    pub signer: EthSigner,
    /// Current time.
    pub now: Timestamp,
}

impl Harness {
    /// Default configuration with auto-convert disabled, so conversions
    /// only happen when a test asks for them.
    #[must_use]
    pub fn new() -> Self {
        let mut config = TokenConfig::default();
        config.conversion.auto_convert = false;
        Self::with_config(config)
    }

    /// Deploys with `config`, seeds the pool and hands the holder over.
    #[must_use]
    pub fn with_config(config: TokenConfig) -> Self {
        champ_telemetry::init_test_tracing();

        let signer = EthSigner::generate();
        let asset = Arc::new(InMemorySettlementAsset::new(SETTLEMENT));
        let exchange = Arc::new(ConstantProductExchange::new(PAIR, LEDGER, Arc::clone(&asset)));
        let token = ChampToken::deploy(
            config,
            DeployParams {
                address: LEDGER,
                owner: OWNER,
                voucher_signer: signer.address(),
                settlement_holder: SettlementHolder::new(HOLDER, OWNER),
            },
            Arc::clone(&exchange),
            Arc::clone(&asset),
        )
        .expect("deploy");

        let mut harness = Self {
            token,
            asset,
            exchange,
            signer,
            now: GENESIS,
        };
        harness.fund(PAIR, units(POOL_TOKENS));
        harness
            .asset
            .deposit(PAIR, units(POOL_SETTLEMENT))
            .expect("wrap");
        harness
            .exchange
            .seed(units(POOL_TOKENS), units(POOL_SETTLEMENT), OWNER);
        harness
            .token
            .transfer_holder_ownership(&harness.admin(), LEDGER)
            .expect("holder handover");
        harness.token.take_events();
        harness
    }

    /// Owner context at the current time.
    #[must_use]
    pub fn admin(&self) -> CallContext {
        CallContext::new(OWNER, self.now)
    }

    /// `caller` context at the current time.
    #[must_use]
    pub fn ctx(&self, caller: Address) -> CallContext {
        CallContext::new(caller, self.now)
    }

    /// Moves the clock forward.
    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
    }

    /// Untaxed transfer from the owner.
    pub fn fund(&mut self, to: Address, amount: U256) {
        let admin = self.admin();
        self.token
            .exclude_from_fees(&admin, OWNER, true)
            .expect("exclude owner");
        self.token.transfer(&admin, to, amount).expect("fund");
        self.token
            .exclude_from_fees(&admin, OWNER, false)
            .expect("include owner");
    }

    /// Wraps `amount` of settlement asset straight into the holder.
    pub fn fund_holder(&self, amount: U256) {
        self.asset.deposit(HOLDER, amount).expect("wrap");
    }

    /// Taxed transfer between two holders.
    pub fn send(&mut self, from: Address, to: Address, amount: U256) -> TaxBreakdown {
        let ctx = self.ctx(from);
        self.token.transfer(&ctx, to, amount).expect("transfer")
    }

    /// Generates reflection tax with a taxed owner transfer and converts it.
    pub fn accrue_round(&mut self, taxed_amount: U256) -> ConversionReceipt {
        let admin = self.admin();
        self.token
            .transfer(&admin, addr(0xF0), taxed_amount)
            .expect("taxed transfer");
        self.token
            .process_reflections(&admin)
            .expect("process reflections")
    }

    /// Encoded voucher and its signature by the authorized signer.
    #[must_use]
    pub fn voucher(
        &self,
        recipient: Address,
        amount: U256,
        expiry: Timestamp,
        nonce: U256,
    ) -> (Vec<u8>, Vec<u8>) {
        let voucher = Voucher::new(recipient, amount, expiry, nonce);
        let signature = voucher.sign(&self.signer).expect("sign voucher");
        (voucher.encode(), signature)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
