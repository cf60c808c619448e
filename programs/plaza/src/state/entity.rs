use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;

use crate::errors::PlazaError;

// =============================================================================
// ENTITY ADDRESSING
// =============================================================================
//
// Names "a piece of content anywhere in the system" so that votes and replies
// can attach to posts, threads, messages and replies without those registries
// knowing about each other.
//
// id = keccak256(domain || contract_ref || content_type || index_le)
//
// Every component is fixed width, so two distinct triples never encode to the
// same preimage.
// =============================================================================

/// Canonical, opaque content identifier.
pub type EntityId = [u8; 32];

/// Domain separator for entity ids.
pub const ENTITY_ID_DOMAIN: &[u8] = b"plaza:entity:v1";

/// Content-type tags shared by every content registry.
///
/// This is a wire contract: new kinds are appended, existing tags are never
/// renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    UserPost = 0,
    ChatMessage = 1,
    ForumThread = 2,
    Reply = 3,
}

impl ContentType {
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ContentType {
    type Error = anchor_lang::error::Error;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(ContentType::UserPost),
            1 => Ok(ContentType::ChatMessage),
            2 => Ok(ContentType::ForumThread),
            3 => Ok(ContentType::Reply),
            _ => err!(PlazaError::InvalidContentType),
        }
    }
}

/// Compute the entity id of item `index` of `content_type` held by `contract_ref`.
pub fn compute_entity_id(
    contract_ref: &Pubkey,
    content_type: ContentType,
    index: u64,
) -> EntityId {
    keccak::hashv(&[
        ENTITY_ID_DOMAIN,
        contract_ref.as_ref(),
        &[content_type.tag()],
        &index.to_le_bytes(),
    ])
    .0
}

/// Entity id of a reply issued by this program.
pub fn reply_entity_id(reply_id: u64) -> EntityId {
    compute_entity_id(&crate::ID, ContentType::Reply, reply_id)
}

/// Check that `claimed` is the id of the given triple.
pub fn verify_entity_id(
    claimed: &EntityId,
    contract_ref: &Pubkey,
    content_type: ContentType,
    index: u64,
) -> Result<()> {
    require!(
        compute_entity_id(contract_ref, content_type, index) == *claimed,
        PlazaError::EntityIdMismatch
    );
    Ok(())
}
