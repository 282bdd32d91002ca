use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve POST /api/talk over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        #[arg(short, long, default_value = "8787")]
        port: u16,
    },

    /// Send one message through the completion proxy and print the reply
    Ask { message: String },

    /// Interactive chat session against a running server
    Chat {
        /// Base URL of a running `muutalk serve`
        #[arg(long, default_value = "http://127.0.0.1:8787")]
        url: String,

        /// Show a canned companion reply instead of the error when a call fails
        #[arg(long)]
        fallback: bool,
    },
}
