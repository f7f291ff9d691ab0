// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::bail;
use clap::Parser;
use slog::Drain;
use slog::Logger;
use slog::o;

use dbrest::AccountsClient;
use dbrest::Credentials;
use dbrest::DEFAULT_ACCOUNTS_ENDPOINT;
use dbrest_test_client::Tester;

#[derive(Debug, Parser)]
#[clap(about = "Account API test client")]
struct Args {
    #[clap(long, env = "DBREST_ENDPOINT", default_value = DEFAULT_ACCOUNTS_ENDPOINT)]
    endpoint: String,

    #[clap(long, env = "DBREST_ACCOUNT_ID")]
    account_id: String,

    #[clap(long, env = "DBREST_USERNAME", conflicts_with = "token")]
    username: Option<String>,

    #[clap(long, env = "DBREST_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// A Bearer token
    #[clap(long, env = "DBREST_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Also create and delete a workspace
    #[clap(long)]
    workspaces: bool,
}

fn logger() -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

fn main() -> anyhow::Result<()> {
    let opt: Args = Args::try_parse()?;

    let credentials = match (opt.username, opt.password, opt.token) {
        (Some(username), Some(password), None) => {
            Credentials::basic(&username, &password)
        }

        (None, None, Some(token)) => Credentials::bearer(&token),

        _ => bail!("either --username and --password or --token is required"),
    };

    let client = AccountsClient::with_endpoint(
        logger(),
        &opt.endpoint,
        &opt.account_id,
        credentials,
    )?;

    Tester::new(client).with_workspaces(opt.workspaces).run()?;

    println!("SUCCESS");

    Ok(())
}
