use crate::cli::{
    Command, GroupCommand, LoanCommand, MemberCommand, ReportCommand, SavingCommand,
};
use crate::format;
use anyhow::{bail, Result};
use colored::Colorize;
use ledger_service::{
    reporting, LedgerStore, LoanRecord, MemberRegistry, NewLoan, NewMember, NewSaving,
    SavingsRecord,
};
use uuid::Uuid;

/// How many records the dashboard shows per activity panel.
const DASHBOARD_RECENT: usize = 5;

pub struct App {
    store: LedgerStore,
    registry: MemberRegistry,
}

impl App {
    pub fn new(store: LedgerStore, registry: MemberRegistry) -> Self {
        Self { store, registry }
    }

    pub fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Group(cmd) => self.run_group(cmd),
            Command::Saving(cmd) => self.run_saving(cmd),
            Command::Loan(cmd) => self.run_loan(cmd),
            Command::Member(cmd) => self.run_member(cmd),
            Command::Report(cmd) => self.run_report(cmd),
            Command::Dashboard => self.run_dashboard(),
        }
    }

    fn run_group(&mut self, cmd: GroupCommand) -> Result<()> {
        match cmd {
            GroupCommand::Create { name, description } => {
                let group = self.store.create_group(&name, description)?;
                println!("Created group {} ({})", group.name.bold(), group.id);
            }
            GroupCommand::List => {
                if self.store.groups().is_empty() {
                    println!("No groups yet. Create one with `chamaledger group create <name>`.");
                    return Ok(());
                }
                let active_id = self.store.active_group().map(|g| g.id);
                for group in self.store.groups() {
                    let marker = if Some(group.id) == active_id { "*" } else { " " };
                    println!(
                        "{} {}  {}  created {}",
                        marker,
                        group.id,
                        group.name.bold(),
                        format::date(group.created_at)
                    );
                }
            }
            GroupCommand::Select { id } => {
                let group = self.store.select_group(id)?;
                println!("Active group is now {}", group.name.bold());
            }
        }
        Ok(())
    }

    fn run_saving(&mut self, cmd: SavingCommand) -> Result<()> {
        match cmd {
            SavingCommand::Add {
                member,
                amount,
                notes,
            } => {
                let record = self.store.record_saving(NewSaving {
                    member_name: member,
                    amount,
                    notes,
                })?;
                println!(
                    "Recorded {} from {}",
                    format::currency(record.amount).green(),
                    record.member_name.bold()
                );
            }
            SavingCommand::List => {
                let records = self.store.group_savings();
                if records.is_empty() {
                    println!("No savings recorded for the active group.");
                    return Ok(());
                }
                for record in &records {
                    print_saving(record);
                }
                println!(
                    "Total: {}",
                    format::currency(reporting::total_savings(&records)).green()
                );
            }
        }
        Ok(())
    }

    fn run_loan(&mut self, cmd: LoanCommand) -> Result<()> {
        match cmd {
            LoanCommand::Add {
                member,
                amount,
                interest_rate,
                due_date,
                notes,
            } => {
                let record = self.store.record_loan(NewLoan {
                    member_name: member,
                    amount,
                    interest_rate,
                    due_date,
                    notes,
                })?;
                println!(
                    "Recorded loan of {} to {}",
                    format::currency(record.amount).red(),
                    record.member_name.bold()
                );
            }
            LoanCommand::List => {
                let loans = self.store.group_loans();
                if loans.is_empty() {
                    println!("No loans recorded for the active group.");
                    return Ok(());
                }
                for loan in &loans {
                    print_loan(loan);
                }
                println!(
                    "Outstanding: {}",
                    format::currency(reporting::outstanding_loans(&loans)).red()
                );
            }
            LoanCommand::Status { id, status } => {
                self.store.set_loan_status(id, status.into())?;
                println!("Loan {} marked {}", id, format!("{:?}", status).to_lowercase());
            }
        }
        Ok(())
    }

    fn run_member(&mut self, cmd: MemberCommand) -> Result<()> {
        let group_id = self.active_group_id()?;
        match cmd {
            MemberCommand::Add {
                name,
                phone,
                email,
                join_date,
            } => {
                let member = self.registry.add_member(
                    group_id,
                    NewMember {
                        name,
                        phone,
                        email,
                        join_date,
                    },
                )?;
                println!("Added member {} ({})", member.name.bold(), member.id);
            }
            MemberCommand::List => {
                let roster = self.registry.members(group_id)?;
                if roster.is_empty() {
                    println!("No members in the active group.");
                    return Ok(());
                }
                for member in roster {
                    println!(
                        "{}  {}  {}  {}  joined {}",
                        member.id,
                        member.name.bold(),
                        member.phone.as_deref().unwrap_or("-"),
                        member.email.as_deref().unwrap_or("-"),
                        format::calendar_date(member.join_date)
                    );
                }
            }
            MemberCommand::Remove { id } => {
                self.registry.remove_member(group_id, id)?;
                println!("Removed member {}", id);
            }
        }
        Ok(())
    }

    fn run_report(&mut self, cmd: ReportCommand) -> Result<()> {
        self.active_group_id()?;
        let savings = self.store.group_savings();
        let loans = self.store.group_loans();

        match cmd {
            ReportCommand::Summary => {
                let total = reporting::total_savings(&savings);
                let outstanding = reporting::outstanding_loans(&loans);
                println!("Total savings:     {}", format::currency(total).green());
                println!("Outstanding loans: {}", format::currency(outstanding).red());
                println!(
                    "Available funds:   {}",
                    format::currency(reporting::available_funds(total, outstanding)).bold()
                );
            }
            ReportCommand::Monthly => {
                println!("{}", "Monthly savings".bold());
                print_buckets(&reporting::monthly_savings(&savings));
                println!();
                println!("{}", "Monthly loans".bold());
                print_buckets(&reporting::monthly_loans(&loans));
            }
            ReportCommand::Top => {
                println!("{}", "Top savers".bold());
                print_ranking(&reporting::top_savers(&savings));
                println!();
                println!("{}", "Top borrowers (active loans)".bold());
                print_ranking(&reporting::top_borrowers(&loans));
            }
        }
        Ok(())
    }

    fn run_dashboard(&mut self) -> Result<()> {
        let group = match self.store.active_group() {
            Some(group) => group.clone(),
            None => bail!("no active group selected; run `chamaledger group select <id>` first"),
        };
        let savings = self.store.group_savings();
        let loans = self.store.group_loans();
        let total = reporting::total_savings(&savings);
        let outstanding = reporting::outstanding_loans(&loans);

        println!("{}", group.name.bold());
        if let Some(description) = &group.description {
            println!("{}", description);
        }
        println!();
        println!("Total savings:     {}", format::currency(total).green());
        println!("Outstanding loans: {}", format::currency(outstanding).red());

        println!();
        println!("{}", "Recent savings".bold());
        let recent = self.store.recent_savings(DASHBOARD_RECENT);
        if recent.is_empty() {
            println!("  none");
        }
        for record in &recent {
            print_saving(record);
        }

        println!();
        println!("{}", "Recent loans".bold());
        let recent = self.store.recent_loans(DASHBOARD_RECENT);
        if recent.is_empty() {
            println!("  none");
        }
        for loan in &recent {
            print_loan(loan);
        }
        Ok(())
    }

    fn active_group_id(&self) -> Result<Uuid> {
        match self.store.active_group() {
            Some(group) => Ok(group.id),
            None => bail!("no active group selected; run `chamaledger group select <id>` first"),
        }
    }
}

fn print_saving(record: &SavingsRecord) {
    println!(
        "{}  {}  {}  {}",
        record.id,
        format::date(record.created_at),
        record.member_name.bold(),
        format::currency(record.amount).green()
    );
}

fn print_loan(loan: &LoanRecord) {
    let due = loan
        .due_date
        .map(format::calendar_date)
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{}  {}  {}  {}  due {}  [{}]",
        loan.id,
        format::date(loan.created_at),
        loan.member_name.bold(),
        format::currency(loan.amount).red(),
        due,
        loan.status.as_str()
    );
}

fn print_buckets(buckets: &[(String, rust_decimal::Decimal)]) {
    if buckets.is_empty() {
        println!("  none");
    }
    for (key, amount) in buckets {
        println!("  {:<9} {}", format::month_label(key), format::currency(*amount));
    }
}

fn print_ranking(ranked: &[(String, rust_decimal::Decimal)]) {
    if ranked.is_empty() {
        println!("  none");
    }
    for (position, (name, amount)) in ranked.iter().enumerate() {
        println!("  {}. {}  {}", position + 1, name.bold(), format::currency(*amount));
    }
}
