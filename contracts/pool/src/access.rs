use crate::error::Error;
use crate::events::{self, ROLE_GRANTED, ROLE_REVOKED};
use crate::storage::Storage;
use crate::types::Role;
use soroban_sdk::{Address, BytesN, Env, Vec};

pub struct AccessRegistry;

impl AccessRegistry {
    /// Seed the role sets at pool creation
    ///
    /// The platform owner controls the registry and is the default Bouncer;
    /// the creator only administers the pool.
    pub fn seed(
        env: &Env,
        owner: &Address,
        creator: &Address,
        admins: &Vec<Address>,
        bouncers: &Vec<Address>,
    ) {
        Storage::set_owner(env, owner);
        Storage::add_role(env, Role::Bouncer, owner);
        Storage::add_role(env, Role::Admin, creator);

        for admin in admins.iter() {
            Storage::add_role(env, Role::Admin, &admin);
        }
        for bouncer in bouncers.iter() {
            Storage::add_role(env, Role::Bouncer, &bouncer);
        }
    }

    pub fn has_role(env: &Env, principal: &Address, role: Role) -> bool {
        Storage::has_role(env, role, principal)
    }

    /// Authorization guard used by every role-gated entry point
    pub fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), Error> {
        caller.require_auth();

        if !Storage::has_role(env, role, caller) {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();

        let owner = Storage::get_owner(env)?;
        if *caller != owner {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }

    pub fn grant_role(env: &Env, caller: &Address, principal: &Address, role: Role) -> Result<(), Error> {
        Self::require_owner(env, caller)?;

        Storage::add_role(env, role, principal);
        events::role_event(env, ROLE_GRANTED, caller, principal, role);
        Ok(())
    }

    pub fn revoke_role(env: &Env, caller: &Address, principal: &Address, role: Role) -> Result<(), Error> {
        Self::require_owner(env, caller)?;

        Storage::remove_role(env, role, principal);
        events::role_event(env, ROLE_REVOKED, caller, principal, role);
        Ok(())
    }

    /// Bind an ed25519 admission key to the calling bouncer
    pub fn register_admission_key(env: &Env, bouncer: &Address, key: &BytesN<32>) -> Result<(), Error> {
        Self::require_role(env, bouncer, Role::Bouncer)?;

        Storage::set_admission_key(env, key, bouncer);
        Ok(())
    }
}
