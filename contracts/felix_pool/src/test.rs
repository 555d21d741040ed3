use super::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const THRESHOLD: i128 = 100;
const CAP: i128 = 1_000;
const START: u64 = 1_000;
const END: u64 = 2_000;
const RATE: i128 = 10;

struct Setup {
    env: Env,
    client: FelixPoolClient<'static>,
    pool: Address,
    admin: Address,
    wallet: Address,
    currency: Address,
}

fn setup() -> Setup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let wallet = Address::generate(&env);
    let currency = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let pool = env.register(FelixPool, ());
    let client = FelixPoolClient::new(&env, &pool);
    client.init(&admin, &currency, &wallet, &THRESHOLD, &CAP, &START, &END, &RATE);

    Setup {
        env,
        client,
        pool,
        admin,
        wallet,
        currency,
    }
}

impl Setup {
    fn funded(&self, amount: i128) -> Address {
        let contributor = Address::generate(&self.env);
        token::StellarAssetClient::new(&self.env, &self.currency).mint(&contributor, &amount);
        contributor
    }

    fn contributor(&self, amount: i128) -> Address {
        let contributor = self.funded(amount);
        self.client.deposit(&contributor, &amount);
        contributor
    }

    fn balance(&self, of: &Address) -> i128 {
        token::Client::new(&self.env, &self.currency).balance(of)
    }

    fn sale_token(&self, amount: i128) -> Address {
        let token = self
            .env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address();
        token::StellarAssetClient::new(&self.env, &token).mint(&self.pool, &amount);
        token
    }

    fn warp(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }
}

#[test]
fn test_init_sets_config() {
    let s = setup();
    let config = s.client.get_config();

    assert_eq!(config.admin, s.admin);
    assert_eq!(config.threshold, THRESHOLD);
    assert_eq!(config.end_time, END);
    assert_eq!(config.rate, RATE);
    assert_eq!(s.client.state(), SaleState::Funding);
    assert_eq!(s.client.claim_percentage(), 100);

    let result = s.client.try_init(
        &s.admin, &s.currency, &s.wallet, &THRESHOLD, &CAP, &START, &END, &RATE,
    );
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
}

#[test]
fn test_init_rejects_bad_params() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let wallet = Address::generate(&env);
    let currency = Address::generate(&env);
    let client = FelixPoolClient::new(&env, &env.register(FelixPool, ()));

    // reversed window
    let result = client.try_init(&admin, &currency, &wallet, &THRESHOLD, &CAP, &END, &START, &RATE);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));

    // threshold above cap
    let result = client.try_init(&admin, &currency, &wallet, &(CAP + 1), &CAP, &START, &END, &RATE);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));

    let result = client.try_init(&admin, &currency, &wallet, &THRESHOLD, &CAP, &START, &END, &0);
    assert_eq!(result, Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_deposit_window_is_inclusive() {
    let s = setup();
    let early = s.funded(10);

    s.warp(START - 1);
    assert_eq!(s.client.try_deposit(&early, &10), Err(Ok(Error::OutsideWindow)));

    s.warp(START);
    s.client.deposit(&early, &5);

    s.warp(END);
    s.client.deposit(&early, &5);
    assert_eq!(s.client.total_contributions(), 10);

    let late = s.funded(10);
    s.warp(END + 1);
    assert_eq!(s.client.try_deposit(&late, &10), Err(Ok(Error::OutsideWindow)));
    assert_eq!(s.client.total_contributions(), 10);
}

#[test]
fn test_deposit_records_entitlement() {
    let s = setup();
    let alice = s.contributor(30);
    let bob = s.contributor(20);

    assert_eq!(s.client.contribution_of(&alice), 30);
    assert_eq!(s.client.entitlement_of(&alice), 300);
    assert_eq!(s.client.entitlement_of(&bob), 200);
    assert_eq!(s.client.total_tokens(), 500);
    assert_eq!(s.balance(&s.pool), 50);

    assert_eq!(s.client.try_deposit(&alice, &0), Err(Ok(Error::InvalidParams)));
}

#[test]
fn test_deposit_respects_cap() {
    let s = setup();
    s.contributor(CAP - 10);

    let late = s.funded(11);
    assert_eq!(s.client.try_deposit(&late, &11), Err(Ok(Error::CapExceeded)));
    s.client.deposit(&late, &10);
    assert_eq!(s.client.total_contributions(), CAP);
}

#[test]
fn test_refund_when_threshold_missed() {
    let s = setup();
    let alice = s.contributor(60);

    // Window still open
    assert_eq!(s.client.try_claim_refund(&alice), Err(Ok(Error::InvalidState)));

    s.warp(END + 1);
    assert_eq!(
        s.client.try_finalize(&s.admin, &s.sale_token(600)),
        Err(Ok(Error::ThresholdNotMet))
    );

    assert_eq!(s.client.claim_refund(&alice), 60);
    assert_eq!(s.balance(&alice), 60);
    assert_eq!(s.client.entitlement_of(&alice), 0);
    assert_eq!(s.client.total_tokens(), 0);
    assert_eq!(s.client.try_claim_refund(&alice), Err(Ok(Error::NothingToRefund)));
}

#[test]
fn test_no_refund_when_threshold_met() {
    let s = setup();
    let alice = s.contributor(THRESHOLD);

    s.warp(END + 1);
    assert_eq!(s.client.try_claim_refund(&alice), Err(Ok(Error::InvalidState)));
}

#[test]
fn test_finalize_guards() {
    let s = setup();
    s.contributor(THRESHOLD);
    let token = s.sale_token(THRESHOLD * RATE - 1);

    // end_time itself still belongs to the window
    s.warp(END);
    assert_eq!(s.client.try_finalize(&s.admin, &token), Err(Ok(Error::InvalidState)));

    s.warp(END + 1);
    let stranger = Address::generate(&s.env);
    assert_eq!(s.client.try_finalize(&stranger, &token), Err(Ok(Error::Unauthorized)));
    assert_eq!(
        s.client.try_finalize(&s.admin, &token),
        Err(Ok(Error::InsufficientTokens))
    );
}

#[test]
fn test_finalize_pays_wallet() {
    let s = setup();
    let alice = s.contributor(80);
    s.contributor(40);

    s.warp(END + 1);
    let token = s.sale_token(1_200);
    s.client.finalize(&s.admin, &token);

    assert_eq!(s.client.state(), SaleState::TokenPayout);
    assert_eq!(s.client.payout_token(), Some(token.clone()));
    assert_eq!(s.balance(&s.wallet), 120);
    assert_eq!(s.balance(&s.pool), 0);

    assert_eq!(s.client.try_finalize(&s.admin, &token), Err(Ok(Error::InvalidState)));
    assert_eq!(s.client.try_claim_refund(&alice), Err(Ok(Error::InvalidState)));
}

#[test]
fn test_claim_tokens_by_percentage() {
    let s = setup();
    let alice = s.contributor(60);
    s.contributor(40);

    assert_eq!(s.client.try_claim_tokens(&alice), Err(Ok(Error::InvalidState)));

    s.warp(END + 1);
    let token = s.sale_token(1_000);
    s.client.finalize(&s.admin, &token);

    assert_eq!(
        s.client.try_set_claim_percentage(&s.admin, &101),
        Err(Ok(Error::InvalidParams))
    );
    assert_eq!(
        s.client.try_set_claim_percentage(&alice, &50),
        Err(Ok(Error::Unauthorized))
    );
    s.client.set_claim_percentage(&s.admin, &50);

    assert_eq!(s.client.claim_tokens(&alice), 300);
    assert_eq!(s.client.claim_tokens(&alice), 150);
    assert_eq!(s.client.entitlement_of(&alice), 150);

    s.client.set_claim_percentage(&s.admin, &100);
    assert_eq!(s.client.claim_tokens(&alice), 150);
    assert_eq!(s.client.try_claim_tokens(&alice), Err(Ok(Error::NothingToClaim)));

    let tokens = token::Client::new(&s.env, &token);
    assert_eq!(tokens.balance(&alice), 600);
    assert_eq!(tokens.balance(&s.pool), 400);
    assert_eq!(s.client.total_tokens(), 400);
}

#[test]
fn test_zero_percentage_releases_nothing() {
    let s = setup();
    let alice = s.contributor(THRESHOLD);

    s.warp(END + 1);
    s.client.finalize(&s.admin, &s.sale_token(THRESHOLD * RATE));
    s.client.set_claim_percentage(&s.admin, &0);

    assert_eq!(s.client.try_claim_tokens(&alice), Err(Ok(Error::NothingToClaim)));
}
