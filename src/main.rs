mod config;
mod error;
mod formatter;
mod language;
mod pipeline;
mod reply;
mod summarize;
#[cfg(test)]
mod testing;
mod transcript;
mod translate;
mod video;

use std::sync::Arc;

use config::Config;
use formatter::pack_lines;
use language::Language;
use pipeline::Pipeline;
use teloxide::{
    dispatching::{UpdateFilterExt, UpdateHandler},
    prelude::*,
    types::ChatId,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const MAX_MESSAGE_SIZE: usize = 4096; // Telegram's message size limit

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Launching VidSums bot (model {})...", config.model);

    let pipeline = Arc::new(Pipeline::from_config(&config));
    let bot = Bot::from_env();

    Dispatcher::builder(bot, handler_tree())
        .dependencies(dptree::deps![pipeline])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn handler_tree() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry().branch(Update::filter_message().endpoint(handle_message))
}

#[derive(Debug, PartialEq)]
enum Request<'a> {
    Empty,
    Help,
    Languages,
    UnknownLanguage(&'a str),
    Summarize { url: &'a str, language: Language },
}

/// `<url> [language code]`, or one of the `/start`, `/help` and `/languages` commands.
fn parse_request(text: &str) -> Request<'_> {
    let mut parts = text.split_whitespace();
    let Some(first) = parts.next() else {
        return Request::Empty;
    };

    // Commands may carry the bot's name in group chats: /help@vidsums_bot
    match first.split('@').next().unwrap_or(first) {
        "/start" | "/help" => Request::Help,
        "/languages" => Request::Languages,
        _ => match parts.next() {
            None => Request::Summarize {
                url: first,
                language: Language::ENGLISH,
            },
            Some(code) => match Language::parse(code) {
                Some(language) => Request::Summarize {
                    url: first,
                    language,
                },
                None => Request::UnknownLanguage(code),
            },
        },
    }
}

async fn handle_message(bot: Bot, msg: Message, pipeline: Arc<Pipeline>) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, reply::USAGE).await?;
        return Ok(());
    };

    match parse_request(text) {
        Request::Empty => {
            bot.send_message(msg.chat.id, reply::EMPTY_REQUEST).await?;
        }
        Request::Help => {
            bot.send_message(msg.chat.id, reply::USAGE).await?;
        }
        Request::Languages => {
            send_text(&bot, msg.chat.id, &reply::languages()).await?;
        }
        Request::UnknownLanguage(code) => {
            bot.send_message(msg.chat.id, reply::unknown_language(code))
                .await?;
        }
        Request::Summarize { url, language } => {
            log::info!("Chat {} requested {} ({})", msg.chat.id, url, language.code());
            let outcome = pipeline.run(url, language).await;

            if let Some(video) = &outcome.video {
                bot.send_message(msg.chat.id, reply::header(video)).await?;
            }
            for notice in reply::notices(&outcome.notices) {
                bot.send_message(msg.chat.id, notice).await?;
            }
            match outcome.result {
                Ok(summary) => send_text(&bot, msg.chat.id, &reply::summary(&summary)).await?,
                Err(e) => {
                    bot.send_message(msg.chat.id, reply::error(&e)).await?;
                }
            }
        }
    }

    Ok(())
}

/// Sends `text` as as many messages as Telegram's size limit requires.
async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> HandlerResult {
    for chunk in pack_lines(text, MAX_MESSAGE_SIZE)? {
        bot.send_message(chat_id, chunk).await?;
    }
    Ok(())
}
