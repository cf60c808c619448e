use anchor_lang::prelude::*;
use crate::state::ReplyLedger;

#[derive(Accounts)]
pub struct InitializeReplyLedger<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        init,
        payer = payer,
        space = ReplyLedger::SIZE,
        seeds = [ReplyLedger::SEED],
        bump,
    )]
    pub reply_ledger: Account<'info, ReplyLedger>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeReplyLedger>) -> Result<()> {
    let reply_ledger = &mut ctx.accounts.reply_ledger;
    reply_ledger.reply_count = 0;
    reply_ledger.bump = ctx.bumps.reply_ledger;

    msg!("Initialized reply ledger");

    Ok(())
}
