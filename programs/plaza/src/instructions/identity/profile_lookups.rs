use anchor_lang::prelude::*;
use crate::state::{self, load_optional, Delegation, Profile};

// Read-only instructions. Results travel back as return data, so clients
// call these through transaction simulation.

#[derive(Accounts)]
#[instruction(signer: Pubkey)]
pub struct ResolveIdentity<'info> {
    /// CHECK: Delegation PDA of `signer`; may be uninitialized
    #[account(
        seeds = [Delegation::SEED, signer.as_ref()],
        bump,
    )]
    pub delegation: UncheckedAccount<'info>,
}

pub fn resolve_effective_identity(
    ctx: Context<ResolveIdentity>,
    signer: Pubkey,
) -> Result<Pubkey> {
    let delegation = load_optional::<Delegation>(&ctx.accounts.delegation)?;
    Ok(state::resolve_effective_identity(&signer, delegation.as_ref()))
}

pub fn is_delegate(
    ctx: Context<ResolveIdentity>,
    _candidate: Pubkey,
    primary: Pubkey,
) -> Result<bool> {
    let delegation = load_optional::<Delegation>(&ctx.accounts.delegation)?;
    Ok(delegation.map_or(false, |d| d.acts_for(&primary)))
}

#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct HasProfile<'info> {
    /// CHECK: Profile PDA of `identity`; may be uninitialized
    #[account(
        seeds = [Profile::SEED, identity.as_ref()],
        bump,
    )]
    pub profile: UncheckedAccount<'info>,
}

pub fn has_profile(ctx: Context<HasProfile>, _identity: Pubkey) -> Result<bool> {
    let profile = load_optional::<Profile>(&ctx.accounts.profile)?;
    Ok(profile.map_or(false, |p| p.exists))
}
