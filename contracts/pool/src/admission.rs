use crate::error::Error;
use crate::storage::Storage;
use crate::types::{Admission, Role};
use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Digest a bouncer signs to admit `contributor` into this pool
///
/// Formula: sha256(xdr(pool) || xdr(contributor))
pub fn admission_digest(env: &Env, pool: &Address, contributor: &Address) -> BytesN<32> {
    let mut message = Bytes::new(env);
    message.append(&pool.clone().to_xdr(env));
    message.append(&contributor.clone().to_xdr(env));
    env.crypto().sha256(&message).to_bytes()
}

/// Check the admission ticket when the pool is signature gated
///
/// The signer key must be registered by an address that still holds the
/// Bouncer role. A signature that does not verify traps in the host, which
/// aborts the whole invocation.
pub fn check(
    env: &Env,
    required: bool,
    contributor: &Address,
    admission: &Option<Admission>,
) -> Result<(), Error> {
    if !required {
        return Ok(());
    }

    let admission = admission.as_ref().ok_or(Error::Unauthorized)?;

    let bouncer = Storage::get_admission_key(env, &admission.signer).ok_or(Error::Unauthorized)?;
    if !Storage::has_role(env, Role::Bouncer, &bouncer) {
        return Err(Error::Unauthorized);
    }

    let digest = admission_digest(env, &env.current_contract_address(), contributor);
    env.crypto()
        .ed25519_verify(&admission.signer, &digest.into(), &admission.signature);
    Ok(())
}
