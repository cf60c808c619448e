use anchor_lang::prelude::*;
use crate::state::{self, ContentType};

#[derive(Accounts)]
pub struct ComputeEntityId {}

/// Same hashing as every content registry, so clients never re-implement it
pub fn handler(
    _ctx: Context<ComputeEntityId>,
    contract_ref: Pubkey,
    content_type: u8,
    index: u64,
) -> Result<[u8; 32]> {
    let content_type = ContentType::try_from(content_type)?;
    Ok(state::compute_entity_id(&contract_ref, content_type, index))
}
