use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_config::Config;
use lexi_core::study::StudySession;
use lexi_core::types::{AppEvent, DictionaryEntry, QuickCategory, ViewMode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;

/// Line-oriented terminal front. Rendering stays deliberately minimal;
/// everything interesting happens behind the event channels.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let (native, target) = {
        let config = config.read().await;
        (config.languages.native, config.languages.target)
    };

    println!("lexi: {target} for {native} speakers");
    println!("Type a {target} word to look it up. /help lists commands.");

    let mut view = ViewMode::Search;
    let mut current: Option<Box<DictionaryEntry>> = None;
    let mut notebook: Vec<DictionaryEntry> = Vec::new();
    let mut session = StudySession::new();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    let _ = ui_to_app_tx.send(AppEvent::Shutdown).await;
                    break;
                };
                let keep_going = handle_line(
                    line.trim(),
                    &mut view,
                    &mut session,
                    &current,
                    &notebook,
                    &ui_to_app_tx,
                )
                .await?;
                if !keep_going {
                    break;
                }
            }
            event = app_to_ui_rx.recv() => {
                match event {
                    Ok(event) => render_event(event, &mut view, &mut current, &mut notebook, &mut session),
                    Err(_) => break,
                }
            }
        }
    }

    Ok(())
}

async fn handle_line(
    line: &str,
    view: &mut ViewMode,
    session: &mut StudySession,
    current: &Option<Box<DictionaryEntry>>,
    notebook: &[DictionaryEntry],
    tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<bool> {
    if line.is_empty() {
        return Ok(true);
    }

    match line {
        "/quit" | "/q" => {
            tx.send(AppEvent::Shutdown).await?;
            return Ok(false);
        }
        "/help" => print_help(),
        "/search" => *view = ViewMode::Search,
        "/notebook" => {
            *view = ViewMode::Notebook;
            render_notebook(notebook);
        }
        "/study" => {
            *view = ViewMode::Study;
            *session = StudySession::new();
            render_study(notebook, session);
        }
        "/save" => match current {
            Some(entry) => tx.send(AppEvent::ToggleSave(entry.clone())).await?,
            None => println!("Nothing to save yet; look a word up first."),
        },
        "/story" => tx.send(AppEvent::MakeStory).await?,
        _ => {
            if let Some(rest) = line.strip_prefix("/quick") {
                match (current, rest.trim().parse::<QuickCategory>()) {
                    (None, _) => println!("Look a word up first."),
                    (_, Err(_)) => println!("Categories: natural, mistake, funfact."),
                    (Some(entry), Ok(category)) => {
                        tx.send(AppEvent::QuickAnswer {
                            term: entry.term.clone(),
                            category,
                        })
                        .await?;
                    }
                }
            } else if let Some(rest) = line.strip_prefix("/say") {
                let text = rest.trim();
                let text = if text.is_empty() {
                    current.as_ref().map(|e| e.term.clone())
                } else {
                    Some(text.to_string())
                };
                match text {
                    Some(text) => tx.send(AppEvent::PlaySpeech(text)).await?,
                    None => println!("Nothing to pronounce yet."),
                }
            } else if let Some(rest) = line.strip_prefix("/rm") {
                match rest.trim().parse::<usize>().ok().and_then(|n| notebook.get(n)) {
                    Some(entry) => tx.send(AppEvent::RemoveEntry(entry.id)).await?,
                    None => println!("No notebook entry with that number."),
                }
            } else if *view == ViewMode::Study {
                match line {
                    "n" | "next" => {
                        session.next(notebook.len());
                        render_study(notebook, session);
                    }
                    "p" | "prev" => {
                        session.previous(notebook.len());
                        render_study(notebook, session);
                    }
                    "f" | "flip" => {
                        session.flip();
                        render_study(notebook, session);
                    }
                    _ => println!("Study commands: n(ext), p(rev), f(lip), or /search to leave."),
                }
            } else if line.starts_with('/') {
                println!("Unknown command: {line} (/help lists commands)");
            } else {
                tx.send(AppEvent::Search(line.to_string())).await?;
            }
        }
    }

    Ok(true)
}

fn render_event(
    event: AppEvent,
    view: &mut ViewMode,
    current: &mut Option<Box<DictionaryEntry>>,
    notebook: &mut Vec<DictionaryEntry>,
    session: &mut StudySession,
) {
    match event {
        AppEvent::SearchLoading => {
            *view = ViewMode::Search;
            *current = None;
            println!("Looking it up...");
        }
        AppEvent::SearchResult(entry) => {
            render_entry(&entry, notebook);
            *current = Some(entry);
        }
        AppEvent::SearchFailed(message)
        | AppEvent::StoryFailed(message)
        | AppEvent::QuickFailed(message)
        | AppEvent::SpeechFailed(message) => println!("{message}"),
        AppEvent::NotebookChanged(entries) => {
            *notebook = entries;
            if session.index() >= notebook.len() {
                *session = StudySession::new();
            }
        }
        AppEvent::StoryReady(story) => println!("\n── AI mini dialogue ──\n{story}\n"),
        AppEvent::QuickReady { category, answer } => println!("\n[{category}] {answer}\n"),
        AppEvent::SpeechReady { text, audio } => match audio {
            Some(clip) => println!("(audio ready for \"{text}\": {} bytes)", clip.len()),
            None => println!("(no audio generated for \"{text}\")"),
        },
        _ => {}
    }
}

fn render_entry(entry: &DictionaryEntry, notebook: &[DictionaryEntry]) {
    println!("\n{}", entry.term);
    println!("  {}", entry.definition);
    for example in &entry.examples {
        println!("  - {}", example.target);
        println!("    {}", example.native);
    }
    if !entry.usage_note.is_empty() {
        println!("  vibe check: {}", entry.usage_note);
    }
    match &entry.image_url {
        Some(url) => println!("  [image: data URI, {} chars]", url.len()),
        None => println!("  [no image generated]"),
    }
    let saved = notebook.iter().any(|e| e.same_key(entry));
    if saved {
        println!("  saved; /save removes it\n");
    } else {
        println!("  /save adds it to your notebook\n");
    }
}

fn render_notebook(entries: &[DictionaryEntry]) {
    if entries.is_empty() {
        println!("Notebook is empty. Search for words and save them here!");
        return;
    }

    println!("\nMy words ({}):", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        println!("  {i}. {} - {}", entry.term, entry.definition);
    }
    println!("Commands: /rm <n>, /story, /study\n");
}

fn render_study(entries: &[DictionaryEntry], session: &StudySession) {
    if entries.is_empty() {
        println!("No cards to study. Save some words first!");
        return;
    }

    let index = session.index();
    let entry = &entries[index];
    println!("\nCard {}/{}", index + 1, entries.len());
    if session.flipped() {
        println!("  {} - {}", entry.term, entry.definition);
        if let Some(example) = entry.examples.first() {
            println!("  e.g. {} ({})", example.target, example.native);
        }
    } else {
        println!("  {}", entry.term);
        println!("  (f to flip, n/p to move)");
    }
}

fn print_help() {
    println!("  <word>            look the word up");
    println!("  /save             save or unsave the current result");
    println!("  /quick <cat>      quick answer: natural, mistake, funfact");
    println!("  /say [text]       fetch pronunciation for text or the current term");
    println!("  /notebook         list saved words");
    println!("  /rm <n>           remove notebook entry n");
    println!("  /story            weave saved words into a dialogue");
    println!("  /study            flashcard review (n/p/f inside)");
    println!("  /search           back to search");
    println!("  /quit             exit");
}
