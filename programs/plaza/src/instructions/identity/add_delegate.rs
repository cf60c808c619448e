use anchor_lang::prelude::*;
use crate::errors::PlazaError;
use crate::state::{ensure_can_delegate, Delegation};

#[derive(Accounts)]
#[instruction(delegate: Pubkey)]
pub struct AddDelegate<'info> {
    /// The primary identity granting authority
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: The owner's own delegation PDA; must be uninitialized, delegates cannot delegate
    #[account(
        seeds = [Delegation::SEED, owner.key().as_ref()],
        bump,
    )]
    pub owner_delegation: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = owner,
        space = Delegation::SIZE,
        seeds = [Delegation::SEED, delegate.as_ref()],
        bump,
    )]
    pub delegation: Account<'info, Delegation>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AddDelegate>, delegate: Pubkey) -> Result<()> {
    let owner = ctx.accounts.owner.key();

    require!(
        delegate != Pubkey::default() && delegate != owner,
        PlazaError::InvalidAddress
    );

    ensure_can_delegate(&ctx.accounts.owner_delegation)?;

    let clock = Clock::get()?;
    ctx.accounts
        .delegation
        .bind(delegate, owner, clock.unix_timestamp, ctx.bumps.delegation)?;

    msg!("Authorized delegate {} for {}", delegate, owner);

    Ok(())
}
