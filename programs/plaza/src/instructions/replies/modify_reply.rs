use anchor_lang::prelude::*;
use crate::errors::PlazaError;
use crate::state::{authorize, load_required, store_account, Delegation, Reply, ReplyLocator};

/// Shared by edit and delete. The reply is found through its locator, so
/// callers only need the reply id.
#[derive(Accounts)]
#[instruction(reply_id: u64)]
pub struct ModifyReply<'info> {
    pub signer: Signer<'info>,

    /// CHECK: The signer's delegation PDA; uninitialized when the signer is not a delegate
    #[account(
        seeds = [Delegation::SEED, signer.key().as_ref()],
        bump,
    )]
    pub signer_delegation: UncheckedAccount<'info>,

    /// CHECK: The identity the signer acts for, validated in handler
    pub identity: UncheckedAccount<'info>,

    /// CHECK: Locator PDA of `reply_id`; loaded in handler so unknown ids fail
    /// with IndexOutOfBounds
    #[account(
        seeds = [ReplyLocator::SEED, &reply_id.to_le_bytes()],
        bump,
    )]
    pub reply_locator: UncheckedAccount<'info>,

    /// CHECK: The slot named by `reply_locator`, matched in handler
    #[account(mut)]
    pub reply: UncheckedAccount<'info>,
}

impl<'info> ModifyReply<'info> {
    /// Authorize the signer and load the reply the locator points at.
    fn load(&self) -> Result<(Pubkey, Reply)> {
        let editor = authorize(&self.signer.key(), &self.signer_delegation, &self.identity.key())?;
        let locator =
            load_required::<ReplyLocator>(&self.reply_locator, PlazaError::IndexOutOfBounds)?;
        let reply = load_required::<Reply>(&self.reply, PlazaError::IndexOutOfBounds)?;
        require!(locator.locates(&reply), PlazaError::IndexOutOfBounds);
        Ok((editor, reply))
    }

    fn save(&self, reply: &Reply) -> Result<()> {
        store_account(reply, &self.reply)
    }
}

pub fn edit_reply(ctx: Context<ModifyReply>, reply_id: u64, content: String) -> Result<()> {
    let (editor, mut reply) = ctx.accounts.load()?;

    reply.edit(&editor, content, Clock::get()?.unix_timestamp)?;
    ctx.accounts.save(&reply)?;

    msg!("Edited reply #{} by {}", reply_id, editor);
    Ok(())
}

pub fn delete_reply(ctx: Context<ModifyReply>, reply_id: u64) -> Result<()> {
    let (editor, mut reply) = ctx.accounts.load()?;

    reply.tombstone(&editor)?;
    ctx.accounts.save(&reply)?;

    msg!("Deleted reply #{} by {}", reply_id, editor);
    Ok(())
}
