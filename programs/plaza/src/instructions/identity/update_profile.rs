use anchor_lang::prelude::*;
use crate::errors::PlazaError;
use crate::state::{authorize, load_required, store_account, Delegation, Link, Profile};

/// Shared by every profile mutation. The owner or any of the owner's delegates
/// may sign.
#[derive(Accounts)]
pub struct UpdateProfile<'info> {
    pub signer: Signer<'info>,

    /// CHECK: The signer's delegation PDA; uninitialized when the signer is not a delegate
    #[account(
        seeds = [Delegation::SEED, signer.key().as_ref()],
        bump,
    )]
    pub signer_delegation: UncheckedAccount<'info>,

    /// CHECK: The identity the signer acts for, validated in handler
    pub identity: UncheckedAccount<'info>,

    /// CHECK: Profile PDA of `identity`; loaded in handler so a missing profile
    /// fails with ProfileRequired
    #[account(
        mut,
        seeds = [Profile::SEED, identity.key().as_ref()],
        bump,
    )]
    pub profile: UncheckedAccount<'info>,
}

impl<'info> UpdateProfile<'info> {
    /// Authorize the signer and load the profile it acts on.
    fn load(&self) -> Result<(Pubkey, Profile)> {
        let owner = authorize(&self.signer.key(), &self.signer_delegation, &self.identity.key())?;
        let profile = load_required::<Profile>(&self.profile, PlazaError::ProfileRequired)?;
        require!(profile.exists, PlazaError::ProfileRequired);
        Ok((owner, profile))
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        store_account(profile, &self.profile)
    }
}

pub fn update_profile(
    ctx: Context<UpdateProfile>,
    display_name: String,
    bio: String,
) -> Result<()> {
    let (owner, mut profile) = ctx.accounts.load()?;

    profile.update(display_name, bio, Clock::get()?.unix_timestamp)?;
    ctx.accounts.save(&profile)?;

    msg!("Updated profile of {} (signed by {})", owner, ctx.accounts.signer.key());
    Ok(())
}

pub fn add_link(ctx: Context<UpdateProfile>, name: String, url: String) -> Result<()> {
    let (owner, mut profile) = ctx.accounts.load()?;
    let link = Link::new(name, url)?;

    profile.add_link(link, Clock::get()?.unix_timestamp)?;
    ctx.accounts.save(&profile)?;

    msg!("Added link to profile of {} ({} links)", owner, profile.links.len());
    Ok(())
}

pub fn remove_link(ctx: Context<UpdateProfile>, index: u32) -> Result<()> {
    let (owner, mut profile) = ctx.accounts.load()?;

    let removed = profile.remove_link(index, Clock::get()?.unix_timestamp)?;
    ctx.accounts.save(&profile)?;

    msg!("Removed link '{}' from profile of {}", removed.name, owner);
    Ok(())
}
