use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use ledger_service::LoanStatus;
use rust_decimal::Decimal;
use std::path::PathBuf;
use uuid::Uuid;

/// Savings-group financial management from the command line.
#[derive(Parser)]
#[command(name = "chamaledger", version, about)]
pub struct Cli {
    /// Data directory for persisted collections
    #[arg(long, env = "CHAMALEDGER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage savings groups
    #[command(subcommand)]
    Group(GroupCommand),
    /// Record and list savings deposits for the active group
    #[command(subcommand)]
    Saving(SavingCommand),
    /// Record, list, and settle loans for the active group
    #[command(subcommand)]
    Loan(LoanCommand),
    /// Manage the active group's member roster
    #[command(subcommand)]
    Member(MemberCommand),
    /// Reports over the active group's ledger
    #[command(subcommand)]
    Report(ReportCommand),
    /// Summary of the active group with recent activity
    Dashboard,
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// Create a new savings group
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List all groups
    List,
    /// Select the active group
    Select { id: Uuid },
}

#[derive(Subcommand)]
pub enum SavingCommand {
    /// Record a savings deposit
    Add {
        member: String,
        amount: Decimal,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List the active group's savings records
    List,
}

#[derive(Subcommand)]
pub enum LoanCommand {
    /// Record a loan
    Add {
        member: String,
        amount: Decimal,
        /// Interest rate in percent
        #[arg(long)]
        interest_rate: Option<Decimal>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List the active group's loans
    List,
    /// Update a loan's repayment status
    Status { id: Uuid, status: LoanStatusArg },
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// Add a member to the active group
    Add {
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Join date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        join_date: Option<NaiveDate>,
    },
    /// List the active group's members
    List,
    /// Remove a member from the active group
    Remove { id: Uuid },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Totals: savings, outstanding loans, available funds
    Summary,
    /// Savings and loans bucketed by calendar month
    Monthly,
    /// Top savers and top borrowers
    Top,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoanStatusArg {
    Active,
    Repaid,
}

impl From<LoanStatusArg> for LoanStatus {
    fn from(arg: LoanStatusArg) -> Self {
        match arg {
            LoanStatusArg::Active => LoanStatus::Active,
            LoanStatusArg::Repaid => LoanStatus::Repaid,
        }
    }
}
