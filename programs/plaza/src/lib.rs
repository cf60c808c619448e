use anchor_lang::prelude::*;

pub mod errors;
pub mod instructions;
pub mod reads;
pub mod state;

use instructions::*;

declare_id!("2uEfxPDiTjXEWDcGWtdUGPiqoD9pnkQxzcuL9BBm2EMf");

#[program]
pub mod plaza {
    use super::*;

    // === Identity Registry ===

    /// Create the signer's profile
    pub fn create_profile(
        ctx: Context<CreateProfile>,
        display_name: String,
        bio: String,
    ) -> Result<()> {
        instructions::create_profile::handler(ctx, display_name, bio)
    }

    /// Overwrite display name and bio (owner or delegate)
    pub fn update_profile(
        ctx: Context<UpdateProfile>,
        display_name: String,
        bio: String,
    ) -> Result<()> {
        instructions::update_profile::update_profile(ctx, display_name, bio)
    }

    /// Append a link to a profile (owner or delegate)
    pub fn add_link(ctx: Context<UpdateProfile>, name: String, url: String) -> Result<()> {
        instructions::update_profile::add_link(ctx, name, url)
    }

    /// Remove the link at `index` from a profile (owner or delegate)
    pub fn remove_link(ctx: Context<UpdateProfile>, index: u32) -> Result<()> {
        instructions::update_profile::remove_link(ctx, index)
    }

    /// Authorize `delegate` to act for the signer
    pub fn add_delegate(ctx: Context<AddDelegate>, delegate: Pubkey) -> Result<()> {
        instructions::add_delegate::handler(ctx, delegate)
    }

    /// Revoke `delegate`; a no-op when it does not act for the signer
    pub fn remove_delegate(ctx: Context<RemoveDelegate>, delegate: Pubkey) -> Result<()> {
        instructions::remove_delegate::handler(ctx, delegate)
    }

    /// The identity `signer` acts for
    pub fn resolve_effective_identity(
        ctx: Context<ResolveIdentity>,
        signer: Pubkey,
    ) -> Result<Pubkey> {
        instructions::profile_lookups::resolve_effective_identity(ctx, signer)
    }

    pub fn has_profile(ctx: Context<HasProfile>, identity: Pubkey) -> Result<bool> {
        instructions::profile_lookups::has_profile(ctx, identity)
    }

    /// Whether `candidate` currently acts for `primary`
    pub fn is_delegate(
        ctx: Context<ResolveIdentity>,
        candidate: Pubkey,
        primary: Pubkey,
    ) -> Result<bool> {
        instructions::profile_lookups::is_delegate(ctx, candidate, primary)
    }

    // === Entity Addressing ===

    /// Canonical id of item `index` of `content_type` in `contract_ref`
    pub fn compute_entity_id(
        ctx: Context<ComputeEntityId>,
        contract_ref: Pubkey,
        content_type: u8,
        index: u64,
    ) -> Result<[u8; 32]> {
        instructions::compute_entity_id::handler(ctx, contract_ref, content_type, index)
    }

    // === Voting ===

    /// Pass-through to compute_entity_id for voting clients
    pub fn get_entity_id(
        ctx: Context<ComputeEntityId>,
        contract_ref: Pubkey,
        content_type: u8,
        index: u64,
    ) -> Result<[u8; 32]> {
        instructions::vote_lookups::get_entity_id(ctx, contract_ref, content_type, index)
    }

    /// Cast or switch a vote (1 = up, 2 = down)
    pub fn vote(ctx: Context<CastVote>, entity_id: [u8; 32], vote_type: u8) -> Result<()> {
        instructions::cast_vote::handler(ctx, entity_id, vote_type)
    }

    pub fn get_tally(ctx: Context<GetTally>, entity_id: [u8; 32]) -> Result<state::Tally> {
        instructions::vote_lookups::get_tally(ctx, entity_id)
    }

    pub fn get_vote(
        ctx: Context<GetVote>,
        entity_id: [u8; 32],
        voter: Pubkey,
    ) -> Result<Option<state::VoteType>> {
        instructions::vote_lookups::get_vote(ctx, entity_id, voter)
    }

    // === Replies ===

    /// Create the global reply id counter (once per deployment)
    pub fn initialize_reply_ledger(ctx: Context<InitializeReplyLedger>) -> Result<()> {
        instructions::initialize_ledger::handler(ctx)
    }

    /// Reply to a piece of content; returns the new reply id
    pub fn add_reply(ctx: Context<AddReply>, params: AddReplyParams) -> Result<u64> {
        instructions::add_reply::handler(ctx, params)
    }

    pub fn edit_reply(ctx: Context<ModifyReply>, reply_id: u64, content: String) -> Result<()> {
        instructions::modify_reply::edit_reply(ctx, reply_id, content)
    }

    /// Tombstone a reply; its slot and id stay valid
    pub fn delete_reply(ctx: Context<ModifyReply>, reply_id: u64) -> Result<()> {
        instructions::modify_reply::delete_reply(ctx, reply_id)
    }
}
