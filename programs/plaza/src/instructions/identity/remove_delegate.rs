use anchor_lang::prelude::*;
use crate::state::{close_account, revocable_by, Delegation};

#[derive(Accounts)]
#[instruction(delegate: Pubkey)]
pub struct RemoveDelegate<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: Delegation PDA of `delegate`; may be uninitialized or bound to another primary
    #[account(
        mut,
        seeds = [Delegation::SEED, delegate.as_ref()],
        bump,
    )]
    pub delegation: UncheckedAccount<'info>,
}

/// Idempotent: only a delegation bound to the signer is closed, anything else
/// is a no-op.
pub fn handler(ctx: Context<RemoveDelegate>, delegate: Pubkey) -> Result<()> {
    let owner = ctx.accounts.owner.key();

    if revocable_by(&ctx.accounts.delegation, &owner)? {
        close_account(&ctx.accounts.delegation, &ctx.accounts.owner)?;
        msg!("Removed delegate {} for {}", delegate, owner);
    } else {
        msg!("No delegation of {} for {}, nothing to remove", delegate, owner);
    }

    Ok(())
}
