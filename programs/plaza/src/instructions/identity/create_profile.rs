use anchor_lang::prelude::*;
use crate::state::Profile;

#[derive(Accounts)]
pub struct CreateProfile<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    // init_if_needed so an existing profile surfaces as AlreadyExists
    #[account(
        init_if_needed,
        payer = owner,
        space = Profile::SIZE,
        seeds = [Profile::SEED, owner.key().as_ref()],
        bump,
    )]
    pub profile: Account<'info, Profile>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateProfile>, display_name: String, bio: String) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let clock = Clock::get()?;

    ctx.accounts.profile.initialize(
        owner,
        display_name,
        bio,
        clock.unix_timestamp,
        ctx.bumps.profile,
    )?;

    msg!("Created profile for {}", owner);

    Ok(())
}
