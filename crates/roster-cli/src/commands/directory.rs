use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use clap::Args;
use roster_core::domain::{normalize_email, Instructor};
use roster_core::dto::{DirectoryEntryDto, EmailListDto};
use roster_store::InstructorQuery;
use tracing::debug;

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only instructors teaching a section in this term (e.g. "Fall")
    #[arg(long)]
    pub term: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    /// Course subject prefix (e.g. "CIS")
    #[arg(long)]
    pub subject: Option<String>,
    /// Substring match on name or email
    #[arg(long = "q")]
    pub text: Option<String>,
}

impl FilterArgs {
    fn into_query(self) -> InstructorQuery {
        InstructorQuery {
            term: self.term,
            year: self.year,
            subject: self.subject,
            text: self.text,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct EmailsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub email: String,
}

pub fn list(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let query = args.filter.into_query();
    let instructors = ctx
        .store
        .instructors()
        .list(&query)
        .with_context(|| "list instructors")?;
    debug!(count = instructors.len(), filtered = !query.is_empty(), "listed");

    let entries: Vec<DirectoryEntryDto> = instructors.iter().map(entry_from).collect();
    if ctx.json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No instructors.");
        return Ok(());
    }
    for entry in entries {
        println!("{} <{}>", entry.name, entry.email);
    }
    Ok(())
}

pub fn emails(ctx: &Context<'_>, args: EmailsArgs) -> Result<()> {
    let query = args.filter.into_query();
    let emails = ctx
        .store
        .instructors()
        .email_list(&query)
        .with_context(|| "collect instructor emails")?;
    debug!(count = emails.len(), "emails collected");

    let dto = EmailListDto {
        emails: emails.join(", "),
    };
    if ctx.json {
        return print_json(&dto);
    }
    println!("{}", dto.emails);
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let email =
        normalize_email(&args.email).ok_or_else(|| invalid_input("email cannot be empty"))?;
    let instructor = ctx
        .store
        .instructors()
        .find_by_email(&email)
        .with_context(|| format!("look up {}", email))?
        .ok_or_else(|| not_found(format!("instructor {}", email)))?;

    if ctx.json {
        return print_json(&instructor);
    }

    println!("{}", instructor.display_name());
    println!("  id:    {}", instructor.id);
    if let Some(first) = instructor.first_name.as_deref() {
        println!("  first: {}", first);
    }
    println!("  last:  {}", instructor.last_name);
    println!("  email: {}", instructor.email);
    Ok(())
}

fn entry_from(instructor: &Instructor) -> DirectoryEntryDto {
    DirectoryEntryDto {
        id: instructor.id,
        name: instructor.display_name(),
        email: instructor.email.clone(),
    }
}
