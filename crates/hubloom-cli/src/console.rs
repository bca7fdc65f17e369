//! Console interaction channel
//!
//! Presents each pipeline ask on stdout and reads the decision from
//! stdin. Empty feedback is re-prompted here so the pipeline only ever
//! sees well-shaped replies.

use std::io::Write;

use async_trait::async_trait;
use hubloom_core::{HubBlueprint, Result};
use hubloom_orchestrator::{Ask, InteractionChannel, Reply};

/// Interaction channel over stdin/stdout
#[derive(Debug, Default)]
pub struct ConsoleChannel;

impl ConsoleChannel {
    pub fn new() -> Self {
        Self
    }

    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn review(&self, subject: &str) -> Result<Reply> {
        loop {
            print!("{} [p]roceed, or type feedback: ", subject);
            std::io::stdout().flush()?;
            let line = self.read_line()?;
            match line.as_str() {
                "" => continue,
                "p" | "proceed" => return Ok(Reply::Proceed),
                feedback => return Ok(Reply::Feedback(feedback.to_string())),
            }
        }
    }

    fn print_blueprint(&self, blueprint: &HubBlueprint, defect: Option<&str>) {
        if let Some(defect) = defect {
            println!("\nStructural defect: {}", defect);
        }
        println!("\nProposed blueprint: {}", blueprint.title);
        println!(
            "  assembler: {}  persona: {}",
            blueprint.assembler_id, blueprint.persona_id
        );
        for (i, section) in blueprint.sections.iter().enumerate() {
            println!(
                "  {}. {} [{}] - {}",
                i + 1,
                section.heading,
                section.writer_id,
                section.goal
            );
        }
    }
}

#[async_trait]
impl InteractionChannel for ConsoleChannel {
    async fn ask(&self, ask: Ask) -> Result<Reply> {
        match ask {
            Ask::Architect { blueprint, defect } => {
                self.print_blueprint(&blueprint, defect.as_deref());
                self.review("Blueprint:")
            }
            Ask::Assembler { id, description } => {
                println!("\nAssembler: {} - {}", id, description);
                self.review("Assembler:")
            }
            Ask::Persona { id, description } => {
                println!("\nPersona: {} - {}", id, description);
                self.review("Persona:")
            }
            Ask::Retry { failure } => {
                print!("\nProvider call failed: {}\nRetry? [y/N]: ", failure);
                std::io::stdout().flush()?;
                let line = self.read_line()?;
                Ok(Reply::Retry(matches!(line.as_str(), "y" | "Y" | "yes")))
            }
        }
    }
}
