use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use scribe_llm::AssistantsApi;
use scribe_study::{
    ask_question, logging::init_logging, until_interrupted, Answer, AssistantHandle,
    PollConfig, StudyConfig, StudyError, EXAMPLE_QUESTIONS,
};

struct Prompter {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompter {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `prompt` and read one trimmed line; `None` on end of input.
    /// Ctrl-C while waiting for input ends the session.
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        let Some(line) = until_interrupted(self.lines.next_line()).await else {
            println!("\nGoodbye!");
            std::process::exit(130);
        };
        Ok(line?.map(|l| l.trim().to_string()))
    }
}

async fn answer(
    api: &dyn AssistantsApi,
    handle: &AssistantHandle,
    question: &str,
    poll: &PollConfig,
) {
    println!("Question: {}", question);
    println!("{}", "=".repeat(60));
    println!("Assistant is thinking...\n");

    match until_interrupted(ask_question(api, handle, question, poll)).await {
        None => println!("\nCancelled."),
        Some(Ok(Answer::Replied(reply))) => {
            println!("{}", reply.text);
            if !reply.citations.is_empty() {
                println!("\nCitations:");
                for citation in &reply.citations {
                    println!("  {}", citation.preview());
                }
            }
        }
        Some(Ok(Answer::NoReply)) => println!("No response from the assistant."),
        Some(Ok(Answer::Unsuccessful(run))) => {
            println!("\n❌ Run failed with status: {}", run.status);
            if let Some(error) = &run.last_error {
                println!("Error: {}", error);
            }
        }
        Some(Err(e)) => println!("\n❌ Error: {}", e),
    }

    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StudyConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    init_logging(&config.logging);

    let handle = match config.assistant_store().load_handle() {
        Ok(handle) => handle,
        Err(e @ StudyError::NoAssistant(_)) => {
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let client = config.openai_client()?;
    let poll = config.poll_config();

    println!("Using assistant: {}", handle.id);
    println!("\nStudy Q&A Assistant");
    println!("{}", "=".repeat(40));

    let mut prompter = Prompter::new();
    loop {
        println!("\nOptions:");
        println!("1. Ask a question");
        println!("2. Try example questions");
        println!("3. Exit");

        let Some(choice) = prompter.ask("\nChoose an option (1-3): ").await? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                if let Some(question) = prompter.ask("\nEnter your question: ").await? {
                    if !question.is_empty() {
                        answer(&client, &handle, &question, &poll).await;
                    }
                }
            }
            "2" => {
                println!("Testing example questions...");
                for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
                    println!("\n--- Example {} ---", i + 1);
                    answer(&client, &handle, question, &poll).await;

                    if i + 1 < EXAMPLE_QUESTIONS.len()
                        && prompter
                            .ask("\nPress Enter to continue to next question...")
                            .await?
                            .is_none()
                    {
                        break;
                    }
                }
            }
            "3" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}
