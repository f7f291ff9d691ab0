// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use slog::Logger;
use slog::o;

use dbrest::AccountsClient;
use dbrest::Credentials;
use dbrest_test_accounts_server::spawn_background_server;
use dbrest_test_client::Tester;

#[test]
fn test_tester_against_test_server() -> anyhow::Result<()> {
    let addr = spawn_background_server()?;

    let client = AccountsClient::with_endpoint(
        Logger::root(slog::Discard, o!()),
        &format!("http://{addr}"),
        "449e7a5c-69d3-4b8a-aaaf-5c9b713ebc65",
        Credentials::bearer("token"),
    )?;

    Tester::new(client).with_workspaces(true).run()
}

#[test]
fn test_tester_twice_on_one_account() -> anyhow::Result<()> {
    let addr = spawn_background_server()?;
    let endpoint = format!("http://{addr}");

    for _ in 0..2 {
        let client = AccountsClient::with_endpoint(
            Logger::root(slog::Discard, o!()),
            &endpoint,
            "1234",
            Credentials::basic("dschrute", "beets"),
        )?;

        Tester::new(client).with_workspaces(true).run()?;
    }

    Ok(())
}
