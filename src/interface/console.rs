//! # Console Wizard
//!
//! Line-oriented frontend: renders the active step, reads one line,
//! dispatches to the controller, reports notices. All state decisions live
//! in the controller; this module only translates text to calls.

use crate::application::wizard::WizardController;
use crate::domain::traits::{ImageHost, StickerGenerator};
use crate::domain::types::{Step, StyleId};
use crate::strings::{messages, wizard};
use anyhow::Result;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

pub async fn run<H: ImageHost, G: StickerGenerator>(
    mut controller: WizardController<H, G>,
) -> Result<()> {
    println!("{}", messages::WELCOME);
    println!("{}", messages::HELP);
    println!("{}", wizard::format_step(controller.session()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim().to_string();
        if input.is_empty() {
            continue;
        }

        match input.as_str() {
            ".quit" | ".exit" => break,
            ".help" => {
                println!("{}", messages::HELP);
                continue;
            }
            ".back" => {
                controller.previous_step();
            }
            ".next" => {
                if let Err(e) = controller.next_step() {
                    println!("{}", messages::blocked(&e.to_string()));
                }
            }
            ".remove" => {
                controller.remove_image();
                println!("{}", messages::image_removed());
            }
            ".ok" if controller.session().current_step == Step::Review => {
                match controller.accept_price() {
                    Ok(_) => println!("{}", messages::PRICE_ACCEPTED),
                    Err(e) => println!("{}", messages::blocked(&e.to_string())),
                }
            }
            ".go" if controller.session().current_step == Step::Generate => {
                run_generation(&mut controller).await;
            }
            _ => handle_step_input(&mut controller, &input).await,
        }

        println!("{}", wizard::format_step(controller.session()));
    }

    println!("{}", messages::GOODBYE);
    Ok(())
}

async fn handle_step_input<H: ImageHost, G: StickerGenerator>(
    controller: &mut WizardController<H, G>,
    input: &str,
) {
    match controller.session().current_step {
        Step::Upload => handle_upload_input(controller, input).await,
        Step::Style => match parse_style(input) {
            Some(style) => match controller.select_style(style) {
                Ok(()) => println!("{}", messages::style_selected(style.display_name())),
                Err(e) => println!("{}", messages::blocked(&e.to_string())),
            },
            None => println!("{}", messages::UNKNOWN_INPUT),
        },
        Step::Quantity => match input.parse::<u32>() {
            Ok(count) => match controller.select_quantity(count) {
                Ok(()) => println!("{}", messages::quantity_selected(count)),
                Err(e) => println!("{}", messages::blocked(&e.to_string())),
            },
            Err(_) => println!("{}", messages::UNKNOWN_INPUT),
        },
        Step::Review | Step::Generate => println!("{}", messages::UNKNOWN_INPUT),
    }
}

async fn handle_upload_input<H: ImageHost, G: StickerGenerator>(
    controller: &mut WizardController<H, G>,
    input: &str,
) {
    if input.starts_with("http://") || input.starts_with("https://") {
        if controller.submit_image(input) {
            println!("{}", messages::image_linked(input));
        } else {
            println!("{}", messages::UNKNOWN_INPUT);
        }
        return;
    }

    match controller.upload_image(Path::new(input)).await {
        Ok(url) => println!("{}", messages::image_linked(&url)),
        Err(e) => println!("{}", messages::upload_failed(&e.to_string())),
    }
}

/// Generation with Ctrl-C wired to the controller's cancel signal, so an
/// interrupt abandons the call instead of killing the process.
async fn run_generation<H: ImageHost, G: StickerGenerator>(
    controller: &mut WizardController<H, G>,
) {
    println!("{}", messages::GENERATING);

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let outcome = controller.generate_with_cancel(cancel_rx).await;
    ctrl_c.abort();

    match outcome {
        Ok(count) => println!("{}", messages::generation_done(count)),
        Err(e) if e.is_validation() => println!("{}", messages::blocked(&e.to_string())),
        Err(e) => println!("{}", messages::generation_failed(&e.to_string())),
    }
}

/// Accepts either the list index or the style name.
fn parse_style(input: &str) -> Option<StyleId> {
    if let Ok(index) = input.parse::<usize>() {
        return StyleId::all().get(index.wrapping_sub(1)).copied();
    }
    StyleId::from_str(input)
}
