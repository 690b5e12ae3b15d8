use clap::Parser;
use tribes_sdk::api::types::{MemberId, TribeId};

#[derive(Parser, Debug)]
pub enum Command {
    /// Save the session of a signed-in user.
    Login(LoginArgs),
    /// Follow a tribe, or unfollow it if already a member.
    Join(JoinArgs),
    /// Promote a tribe member to tribe leader.
    Leader(LeaderArgs),
    /// Print the saved configuration.
    ShowConfig,
}

#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// GitHub handle of the signed-in user
    #[arg(short, long)]
    pub(crate) github_handle: String,
    /// Value of the `csrftoken` cookie of the session
    #[arg(short, long)]
    pub(crate) csrf_token: String,
}

#[derive(Parser, Debug)]
pub struct JoinArgs {
    /// Tribe handle
    #[arg(short, long, value_parser)]
    pub(crate) tribe: TribeId,
}

#[derive(Parser, Debug)]
pub struct LeaderArgs {
    /// Member id
    #[arg(short, long, value_parser)]
    pub(crate) member: MemberId,
}
