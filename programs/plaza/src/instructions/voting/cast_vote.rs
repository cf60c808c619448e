use anchor_lang::prelude::*;
use crate::state::{authorize, Delegation, VoteRecord, VoteTally, VoteType};

// =============================================================================
// CAST VOTE INSTRUCTION
// =============================================================================
//
// Votes are keyed by entity id, so the ledger works the same for posts,
// threads, messages, replies and any content type appended later.
//
// The vote record is keyed by the effective identity: a primary and its
// delegates share one vote per entity.
// =============================================================================

#[derive(Accounts)]
#[instruction(entity_id: [u8; 32])]
pub struct CastVote<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    /// CHECK: The signer's delegation PDA; uninitialized when the signer is not a delegate
    #[account(
        seeds = [Delegation::SEED, signer.key().as_ref()],
        bump,
    )]
    pub signer_delegation: UncheckedAccount<'info>,

    /// CHECK: The identity the signer acts for, validated in handler
    pub identity: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = signer,
        space = VoteTally::SIZE,
        seeds = [VoteTally::SEED, entity_id.as_ref()],
        bump,
    )]
    pub tally: Account<'info, VoteTally>,

    /// One per (entity, voter)
    #[account(
        init_if_needed,
        payer = signer,
        space = VoteRecord::SIZE,
        seeds = [VoteRecord::SEED, entity_id.as_ref(), identity.key().as_ref()],
        bump,
    )]
    pub vote_record: Account<'info, VoteRecord>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CastVote>, entity_id: [u8; 32], vote_type: u8) -> Result<()> {
    let voter = authorize(
        &ctx.accounts.signer.key(),
        &ctx.accounts.signer_delegation,
        &ctx.accounts.identity.key(),
    )?;
    let next = VoteType::try_from(vote_type)?;
    let clock = Clock::get()?;

    let tally = &mut ctx.accounts.tally;
    let vote_record = &mut ctx.accounts.vote_record;

    tally.entity_id = entity_id;
    tally.bump = ctx.bumps.tally;

    vote_record.entity_id = entity_id;
    vote_record.voter = voter;
    vote_record.bump = ctx.bumps.vote_record;

    // Record and tally change together or not at all
    vote_record.cast(tally, next, clock.unix_timestamp)?;

    msg!(
        "Vote {:?} by {} (signed by {}). Current tally: {} up, {} down",
        next,
        voter,
        ctx.accounts.signer.key(),
        tally.up_count,
        tally.down_count
    );

    Ok(())
}
