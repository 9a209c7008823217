//! Demo screens rendered headlessly.
//!
//! Run `cargo run -p dynamic-ui-demo -- help` for more info.
use std::sync::Arc;

use anyhow::Context;
use async_executor::Executor;
use clap::{Parser, Subcommand};
use dynamic_ui::prelude::*;
use dynamic_ui_ssr::{SsrElement, SsrResolver};

/// A button and a count of its clicks.
fn counter(executor: &Arc<Executor<'static>>) -> Ui {
    column(|ui| {
        let clicks = ui.button("+");
        let count = clicks.reduce(executor, 0, |(), count| count + 1);
        ui.text(count.map(|n| n.to_string()));
    })
}

/// Two number entries and their sum, written out as `x + y = sum`.
fn adder() -> Ui {
    column(|ui| {
        let x = ui.int_entry(0);
        ui.text("+");
        let y = ui.int_entry(0);
        ui.text("=");
        ui.text(combine(&x, &y, |x, y| x + y).map(|n| n.to_string()));
    })
}

/// Where the adder's entries sit in its column.
const ADDER_ENTRIES: [usize; 2] = [0, 2];

fn settle(executor: &Executor<'static>) {
    while executor.try_tick() {}
}

fn resolve(ui: Ui, executor: &Arc<Executor<'static>>) -> anyhow::Result<SsrElement> {
    ui.try_resolve(&SsrResolver::new(executor.clone()))
        .context("could not resolve screen")
}

/// The child at `path`, one index per level.
fn descend(root: &SsrElement, path: &[usize]) -> anyhow::Result<SsrElement> {
    let mut element = root.clone();
    for (depth, index) in path.iter().enumerate() {
        element = element
            .children()?
            .get(*index)
            .cloned()
            .with_context(|| format!("no child {} at depth {}", index, depth))?;
    }
    Ok(element)
}

fn print(root: &SsrElement) {
    println!("{}", futures::executor::block_on(root.html_string()));
}

#[derive(Parser)]
#[clap(author, version, about, subcommand_required = true)]
struct Cli {
    /// The screen to show
    #[clap(subcommand)]
    screen: Screen,
}

#[derive(Subcommand)]
enum Screen {
    /// Click a button and count the clicks
    Counter {
        /// How many times to click
        #[clap(long, default_value_t = 3)]
        clicks: u32,
    },
    /// Add two numbers
    Adder {
        /// The first number
        #[clap(long, allow_hyphen_values = true)]
        x: String,
        /// The second number
        #[clap(long, allow_hyphen_values = true)]
        y: String,
    },
}

impl Screen {
    fn run(self) -> anyhow::Result<()> {
        let executor = Arc::new(Executor::new());
        match self {
            Screen::Counter { clicks } => {
                let root = resolve(counter(&executor), &executor)?;
                print(&root);
                let button = descend(&root, &[0])?;
                for n in 1..=clicks {
                    log::info!("click {}", n);
                    button.click()?;
                    settle(&executor);
                    print(&root);
                }
            }
            Screen::Adder { x, y } => {
                let root = resolve(adder(), &executor)?;
                print(&root);
                for (index, raw) in ADDER_ENTRIES.iter().zip([x, y].iter()) {
                    log::info!("entering {:?}", raw);
                    descend(&root, &[*index])?
                        .input(raw)
                        .with_context(|| format!("could not enter {:?}", raw))?;
                    settle(&executor);
                    print(&root);
                }
            }
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().init();

    let cli = Cli::parse();
    cli.screen.run()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn adder_reads_as_a_sum() {
        let executor = Arc::new(Executor::new());
        let root = resolve(adder(), &executor).unwrap();
        assert_eq!(
            futures::executor::block_on(root.html_string()),
            r#"<div class="column"><input type="number" value="0" /> <span>+</span> <input type="number" value="0" /> <span>=</span> <span>0</span></div>"#
        );

        descend(&root, &[ADDER_ENTRIES[1]]).unwrap().input("-5").unwrap();
        settle(&executor);
        assert_eq!(descend(&root, &[4]).unwrap().text().unwrap(), "-5");
        // the operator labels are constant
        assert_eq!(descend(&root, &[1]).unwrap().text().unwrap(), "+");
        assert_eq!(descend(&root, &[3]).unwrap().text().unwrap(), "=");
        assert!(descend(&root, &[5]).is_err());
    }

    #[test]
    fn cli_parses_both_screens() {
        let cli = Cli::try_parse_from(["dynamic-ui-demo", "counter", "--clicks", "2"]).unwrap();
        assert!(matches!(cli.screen, Screen::Counter { clicks: 2 }));
        let cli =
            Cli::try_parse_from(["dynamic-ui-demo", "adder", "--x", "1", "--y", "-2"]).unwrap();
        assert!(matches!(cli.screen, Screen::Adder { ref y, .. } if y == "-2"));
    }
}
