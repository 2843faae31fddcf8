//! Interactive essay editor.
//!
//! Drives one editing session over stdin/stdout: load an essay, show the
//! suggested rewrite, then loop on the edit menu until the user saves.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use essaydesk::assistant::EditOperation;
use essaydesk::chat::menu::{menu_text, MenuChoice, ReviewChoice};
use essaydesk::chat::EditorSession;
use essaydesk::document::list_supported_files;

const RULE: &str =
    "================================================================================";

fn main() -> Result<()> {
    println!("=== EssayDesk ===");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let path = match prompt_for_path(&mut lines)? {
        Some(path) => path,
        None => return Ok(()),
    };

    let mut session = EditorSession::open(&path)
        .with_context(|| format!("Error loading {}", path.display()))?;
    println!("\nSuccessfully loaded essay: {}", session.source_name());
    println!("Essay length: {} characters", session.working_text().len());

    println!("\nGenerating suggested rewrite of your essay...");
    let suggestion = session.generate_suggestion()?;
    print_block("SUGGESTED REWRITE", &suggestion);

    loop {
        println!("\n{}", menu_text());
        let Some(raw) = read_line(&mut lines, "Choice: ")? else {
            break;
        };
        let Some(choice) = MenuChoice::parse(&raw) else {
            println!("Invalid choice. Please enter a number between 0 and 6.");
            continue;
        };
        match choice {
            MenuChoice::Rewrite => {
                if !run_edit_flow(&mut session, EditOperation::Rewrite, &mut lines)? {
                    break;
                }
            }
            MenuChoice::Rephrase => {
                if !run_edit_flow(&mut session, EditOperation::Rephrase, &mut lines)? {
                    break;
                }
            }
            MenuChoice::Expand => {
                if !run_edit_flow(&mut session, EditOperation::Expand, &mut lines)? {
                    break;
                }
            }
            MenuChoice::Show => {
                print_block("CURRENT ESSAY", session.working_text());
                let _ = read_line(&mut lines, "Press Enter to continue...")?;
            }
            MenuChoice::Undo => match session.undo_last_edit()? {
                Some(record) => println!("Reverted {} edit.", record.operation),
                None => println!("Nothing to undo."),
            },
            MenuChoice::History => {
                let history = session.history()?;
                if history.is_empty() {
                    println!("No edits accepted yet.");
                } else {
                    for line in history {
                        println!("{line}");
                    }
                }
            }
            MenuChoice::Save => {
                match session.save()? {
                    Some(saved) => {
                        println!("\nEssay saved successfully as: {}", saved.display())
                    }
                    None => println!("\nNo changes made to save."),
                }
                println!("Thank you for using EssayDesk!");
                break;
            }
        }
    }
    Ok(())
}

/// Asks for an essay path; a directory lists its supported files for pick.
fn prompt_for_path(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<PathBuf>> {
    let Some(raw) = read_line(lines, "Enter the path to your essay file (.txt, .docx, .pdf): ")?
    else {
        return Ok(None);
    };
    let path = PathBuf::from(raw.trim());
    if !path.is_dir() {
        return Ok(Some(path));
    }
    let files = list_supported_files(&path)?;
    if files.is_empty() {
        anyhow::bail!("No supported essay files under {}", path.display());
    }
    println!("Essays found under {}:", path.display());
    for (idx, file) in files.iter().enumerate() {
        println!("{}: {}", idx + 1, file.display());
    }
    loop {
        let Some(raw) = read_line(lines, "Pick a file number: ")? else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= files.len() => return Ok(Some(files[n - 1].clone())),
            _ => println!("Enter a number between 1 and {}.", files.len()),
        }
    }
}

/// Select → propose → review → [accept | reject+feedback → refine] loop.
/// Returns false only when stdin is exhausted.
fn run_edit_flow(
    session: &mut EditorSession,
    operation: EditOperation,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<bool> {
    println!("\nSelect the passage you want to edit.");
    println!("Paste the exact text, or type line numbers (e.g., '5-8' for lines 5 through 8).");
    print_preview(session);

    let passage = loop {
        let Some(raw) = read_line(lines, "\nEnter your selection: ")? else {
            return Ok(false);
        };
        match session.select_passage(&raw) {
            Ok(passage) => break passage,
            Err(err) => println!("{err}"),
        }
    };
    print_block("SELECTED PASSAGE", &passage.text);

    println!("\nProcessing your request...");
    let mut proposal = session.propose_edit(operation, passage)?;
    loop {
        print_block("ORIGINAL PASSAGE", &proposal.passage.text);
        print_block("SUGGESTED REVISION", &proposal.replacement);
        let decision = loop {
            let Some(raw) = read_line(lines, "\nDo you want to accept this revision? (y/n): ")?
            else {
                return Ok(false);
            };
            match ReviewChoice::parse(&raw) {
                Some(choice) => break choice,
                None => println!("Please enter 'y' for yes or 'n' for no."),
            }
        };
        match decision {
            ReviewChoice::Accept => {
                session.accept_pending()?;
                println!("\nPassage updated successfully!");
                return Ok(true);
            }
            ReviewChoice::Reject => {
                session.reject_pending()?;
                println!("\nWhat would you like me to change? (empty input returns to the menu)");
                let Some(feedback) = read_line(lines, "Your feedback: ")? else {
                    return Ok(false);
                };
                if feedback.trim().is_empty() {
                    session.discard_pending();
                    return Ok(true);
                }
                proposal = session.refine_pending(feedback.trim())?;
            }
        }
    }
}

fn print_preview(session: &EditorSession) {
    let lines: Vec<&str> = session.working_text().split('\n').collect();
    println!("\nCurrent essay has {} lines.", lines.len());
    println!("First few lines for reference:");
    for (idx, line) in lines.iter().take(session.preview_lines()).enumerate() {
        let shown: String = line.chars().take(80).collect();
        let ellipsis = if line.chars().count() > 80 { "..." } else { "" };
        println!("{}: {shown}{ellipsis}", idx + 1);
    }
}

fn print_block(title: &str, body: &str) {
    println!("\n{RULE}");
    println!("{title}:");
    println!("{RULE}");
    println!("{body}");
    println!("{RULE}");
}

fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().ok();
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => {
            println!();
            Ok(None)
        }
    }
}
