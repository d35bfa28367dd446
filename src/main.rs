// File: src/main.rs
// Project: Coffer
// Creation date: Monday 10 February 2025
// Author: Vincent Berthier <vincent.berthier@posteo.org>
// -----
// Last modified: Friday 14 February 2025 @ 18:42:44
// Modified by: Vincent Berthier
// -----
// Copyright (c) 2025 <Vincent Berthier>
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the 'Software'), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use coffer::{
    amount::{Currency, Eur, Usd},
    ledger::{Batch, Instruction, Ledger, Outcome},
    processor::Processor,
    vault::Owner,
    Error,
};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

type Result<T> = core::result::Result<T, Error>;

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing()?;

    let alice = Owner::from_bytes(&[1; 32]);
    let bob = Owner::from_bytes(&[2; 32]);
    let (handle, task) = Processor::spawn(Ledger::new());

    let mut opening = Batch::new();
    let alice_usd = opening.add(Instruction::create_vault::<Usd>(alice));
    let bob_usd = opening.add(Instruction::create_vault::<Usd>(bob));
    let alice_eur = opening.add(Instruction::create_vault::<Eur>(alice));
    opening.add(Instruction::mint_into(alice_usd, 1_000));
    opening.add(Instruction::transfer(alice_usd, bob_usd, 250));
    opening.add(Instruction::mint_into(alice_eur, 400));
    let outcomes = handle.submit(opening).await?;
    for outcome in &outcomes {
        info!(?outcome, "applied");
    }

    let vaults = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            Outcome::Created(id) => Some(*id),
            _ => None,
        })
        .collect::<Vec<_>>();
    if let [alice_usd, bob_usd, _] = vaults[..] {
        let overdraft = [
            Instruction::transfer(bob_usd, alice_usd, 200),
            Instruction::transfer(bob_usd, alice_usd, 200),
        ]
        .into_iter()
        .collect::<Batch>();
        if let Err(err) = handle.submit(overdraft).await {
            warn!(%err, "batch rejected");
        }
    }

    drop(handle);
    let ledger = task.join().await?;
    for code in [Usd::code(), Eur::code()] {
        info!(
            currency = %code,
            supply = ledger.supply(&code),
            holdings = ledger.holdings(&code),
            "final state"
        );
    }

    Ok(())
}

fn setup_tracing() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;

    // register layers
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
    Ok(())
}
