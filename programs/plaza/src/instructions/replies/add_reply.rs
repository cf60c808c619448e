use anchor_lang::prelude::*;
use crate::state::{
    authorize, thread_base_depth, verify_entity_id, ContentType, Delegation, Reply, ReplyDraft,
    ReplyLedger, ReplyList, ReplyLocator,
};

// =============================================================================
// ADD REPLY INSTRUCTION
// =============================================================================
//
// The parent is named by (contract_ref, content_type, index). The client also
// passes the entity id it derived, which seeds the reply accounts and must
// match the triple. When the parent is itself a reply issued here
// (contract_ref = this program, ContentType::Reply), that reply is passed as
// `replied_reply` and the new thread continues below its depth.
//
// Account addresses depend on counters read before the append:
//   reply         ["reply", entity_id, reply_list.reply_count]
//   reply_locator ["reply_locator", reply_ledger.reply_count + 1]
// =============================================================================

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct AddReplyParams {
    /// Registry holding the parent content
    pub contract_ref: Pubkey,
    /// ContentType tag of the parent content
    pub content_type: u8,
    /// Index of the parent content within its registry
    pub index: u64,
    /// compute_entity_id(contract_ref, content_type, index)
    pub entity_id: [u8; 32],
    pub content: String,
    /// Reply being answered within the same entity, 0 for top level
    pub parent_reply_id: u64,
}

#[derive(Accounts)]
#[instruction(params: AddReplyParams)]
pub struct AddReply<'info> {
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
        mut,
        seeds = [ReplyLedger::SEED],
        bump = reply_ledger.bump,
    )]
    pub reply_ledger: Account<'info, ReplyLedger>,

    #[account(
        init_if_needed,
        payer = signer,
        space = ReplyList::SIZE,
        seeds = [ReplyList::SEED, params.entity_id.as_ref()],
        bump,
    )]
    pub reply_list: Account<'info, ReplyList>,

    #[account(
        init,
        payer = signer,
        space = Reply::SIZE,
        seeds = [
            Reply::SEED,
            params.entity_id.as_ref(),
            &reply_list.reply_count.to_le_bytes()
        ],
        bump,
    )]
    pub reply: Account<'info, Reply>,

    #[account(
        init,
        payer = signer,
        space = ReplyLocator::SIZE,
        seeds = [ReplyLocator::SEED, &reply_ledger.peek_next_id().to_le_bytes()],
        bump,
    )]
    pub reply_locator: Account<'info, ReplyLocator>,

    /// Required when `parent_reply_id` is non-zero
    pub parent_reply: Option<Account<'info, Reply>>,

    /// Required when the parent entity is a reply issued by this program
    pub replied_reply: Option<Account<'info, Reply>>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AddReply>, params: AddReplyParams) -> Result<u64> {
    let author = authorize(
        &ctx.accounts.signer.key(),
        &ctx.accounts.signer_delegation,
        &ctx.accounts.identity.key(),
    )?;
    let content_type = ContentType::try_from(params.content_type)?;
    verify_entity_id(&params.entity_id, &params.contract_ref, content_type, params.index)?;
    let base_depth = thread_base_depth(
        &params.contract_ref,
        content_type,
        params.index,
        &ctx.accounts.reply_ledger,
        ctx.accounts.replied_reply.as_deref(),
    )?;

    let clock = Clock::get()?;
    let sender = ctx.accounts.signer.key();

    let reply_list = &mut ctx.accounts.reply_list;
    reply_list.entity_id = params.entity_id;
    reply_list.depth = base_depth;
    reply_list.bump = ctx.bumps.reply_list;

    let draft = ReplyDraft {
        author,
        sender,
        content: params.content,
        parent_reply_id: params.parent_reply_id,
    };
    let mut reply = reply_list.append(
        &mut ctx.accounts.reply_ledger,
        draft,
        ctx.accounts.parent_reply.as_deref(),
        clock.unix_timestamp,
    )?;
    reply.bump = ctx.bumps.reply;

    ctx.accounts
        .reply_locator
        .set_inner(ReplyLocator::for_reply(&reply, ctx.bumps.reply_locator));

    let reply_id = reply.reply_id;
    msg!(
        "Reply #{} by {} (signed by {}) at position {} of {:?} #{} (depth {})",
        reply_id,
        author,
        sender,
        reply.position,
        content_type,
        params.index,
        reply.depth
    );
    ctx.accounts.reply.set_inner(reply);

    Ok(reply_id)
}
