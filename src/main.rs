/*
 * WHOIS Lookup Client
 * Copyright (C) 2025 Akaere Networks
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */

use anyhow::Result;
use clap::Parser;

use whois_lookup::config::Cli;
use whois_lookup::core::logger::init_from_args;
use whois_lookup::{log_debug, WhoisClient};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    init_from_args(args.debug, args.journald)?;

    log_debug!("whois-lookup {} querying {}", whois_lookup::version(), args.domain);

    let client = WhoisClient::new(args.whois_config());
    let result = client.whois(&args.domain, args.referral, args.server.as_deref()).await?;

    print!("{}", result);
    Ok(())
}
