use crate::access::AccessRegistry;
use crate::error::Error;
use crate::events::{self, EmergencyWithdrawalEvent, EMERGENCY_WITHDRAWAL, PAYMENT_RECEIVED, VOUCHED};
use crate::storage::Storage;
use crate::types::{Role, VouchFlags};
use soroban_sdk::{log, token, Address, Env};

pub struct EmergencyVouchController;

impl EmergencyVouchController {
    pub fn vouch_as_admin(env: &Env, admin: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;

        let mut vouches = Storage::get_vouches(env);
        vouches.admin_vouched = true;
        Storage::set_vouches(env, &vouches);

        events::role_event(env, VOUCHED, admin, admin, Role::Admin);
        Ok(())
    }

    pub fn vouch_as_poolbase(env: &Env, bouncer: &Address) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;

        let mut vouches = Storage::get_vouches(env);
        vouches.poolbase_vouched = true;
        Storage::set_vouches(env, &vouches);

        events::role_event(env, VOUCHED, bouncer, bouncer, Role::Bouncer);
        Ok(())
    }

    pub fn vouches(env: &Env) -> VouchFlags {
        Storage::get_vouches(env)
    }

    /// Move `amount` of the pool currency out once both sides vouched
    pub fn emergency_remove_wei(
        env: &Env,
        admin: &Address,
        beneficiary: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        let currency = Storage::get_config(env)?.currency;
        Self::remove(env, admin, &currency, beneficiary, amount)
    }

    /// Move `amount` of any token out once both sides vouched
    pub fn emergency_remove_tokens(
        env: &Env,
        admin: &Address,
        token: &Address,
        beneficiary: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        Self::remove(env, admin, token, beneficiary, amount)
    }

    fn remove(
        env: &Env,
        admin: &Address,
        asset: &Address,
        beneficiary: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        AccessRegistry::require_role(env, admin, Role::Admin)?;

        let pool = env.current_contract_address();
        if amount <= 0 || *beneficiary == pool {
            return Err(Error::InvalidParams);
        }
        if !Storage::get_vouches(env).both() {
            return Err(Error::VouchesNotSet);
        }

        token::Client::new(env, asset).transfer(&pool, beneficiary, &amount);

        log!(env, "emergency withdrawal of {}", amount);
        events::publish(
            env,
            EMERGENCY_WITHDRAWAL,
            admin,
            EmergencyWithdrawalEvent {
                pool,
                asset: asset.clone(),
                beneficiary: beneficiary.clone(),
                amount,
            },
        );
        Ok(())
    }

    pub fn emergency_accept_all_payments(env: &Env, bouncer: &Address, accept: bool) -> Result<(), Error> {
        AccessRegistry::require_role(env, bouncer, Role::Bouncer)?;

        Storage::set_accept_all_payments(env, accept);
        Ok(())
    }

    pub fn accepts_all_payments(env: &Env) -> bool {
        Storage::accepts_all_payments(env)
    }

    /// Unsolicited payment into the pool, refused unless a bouncer opened it up
    pub fn receive_payment(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
        from.require_auth();

        if !Storage::accepts_all_payments(env) {
            return Err(Error::PaymentsNotAccepted);
        }
        Self::pull(env, from, amount)
    }

    /// Let the payout wallet send previously paid-out funds back
    pub fn emergency_receive_from_payout(
        env: &Env,
        from: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();

        let config = Storage::get_config(env)?;
        if config.payout_wallet.as_ref() != Some(from) {
            return Err(Error::Unauthorized);
        }
        Self::pull(env, from, amount)
    }

    fn pull(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidParams);
        }

        let currency = Storage::get_config(env)?.currency;
        token::Client::new(env, &currency).transfer(from, &env.current_contract_address(), &amount);

        events::contribution_event(env, PAYMENT_RECEIVED, from, amount);
        Ok(())
    }
}
