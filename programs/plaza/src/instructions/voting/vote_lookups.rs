use anchor_lang::prelude::*;
use crate::instructions::entity::{compute_entity_id, ComputeEntityId};
use crate::state::{load_optional, Tally, VoteRecord, VoteTally, VoteType};

#[derive(Accounts)]
#[instruction(entity_id: [u8; 32])]
pub struct GetTally<'info> {
    /// CHECK: Tally PDA of `entity_id`; uninitialized until the first vote
    #[account(
        seeds = [VoteTally::SEED, entity_id.as_ref()],
        bump,
    )]
    pub tally: UncheckedAccount<'info>,
}

pub fn get_tally(ctx: Context<GetTally>, _entity_id: [u8; 32]) -> Result<Tally> {
    let tally = load_optional::<VoteTally>(&ctx.accounts.tally)?;
    Ok(tally.map(|t| t.tally()).unwrap_or_default())
}

#[derive(Accounts)]
#[instruction(entity_id: [u8; 32], voter: Pubkey)]
pub struct GetVote<'info> {
    /// CHECK: Vote record PDA of (`entity_id`, `voter`); may be uninitialized
    #[account(
        seeds = [VoteRecord::SEED, entity_id.as_ref(), voter.as_ref()],
        bump,
    )]
    pub vote_record: UncheckedAccount<'info>,
}

pub fn get_vote(
    ctx: Context<GetVote>,
    _entity_id: [u8; 32],
    _voter: Pubkey,
) -> Result<Option<VoteType>> {
    let record = load_optional::<VoteRecord>(&ctx.accounts.vote_record)?;
    Ok(record.and_then(|r| r.vote))
}

/// Entity id lookup for voting clients, identical to compute_entity_id
pub fn get_entity_id(
    ctx: Context<ComputeEntityId>,
    contract_ref: Pubkey,
    content_type: u8,
    index: u64,
) -> Result<[u8; 32]> {
    compute_entity_id::handler(ctx, contract_ref, content_type, index)
}
