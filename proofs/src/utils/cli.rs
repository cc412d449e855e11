use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Listening host
    #[arg(long, env = "PROOFS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Listening port
    #[arg(short, long, env = "PROOFS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Base url of the storage provider, e.g. https://<project>.supabase.co
    #[arg(long, env = "SUPABASE_URL")]
    pub storage_url: String,

    /// Service role key used to sign urls on behalf of users
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub service_role_key: String,

    /// Bucket holding the proof files
    #[arg(long, env = "PROOFS_BUCKET", default_value = "proofs")]
    pub bucket: String,
}
