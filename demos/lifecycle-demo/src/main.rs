//! Sigil Agent Identity Lifecycle Demo
//!
//! Walks one agent registry through its whole life: document queries and
//! updates, key issuance and third-party verification, expiry, lockout and
//! recovery, and a two-phase ownership handoff. Time is driven by a manual
//! clock so the timing rules are visible without waiting.

use std::sync::Arc;

use anyhow::Result;
use colored::*;

use sigil_registry::{AgentRegistry, AuthKeyStatus, TRANSFER_ACCEPT_WINDOW_SECS};
use sigil_types::{Address, AgentProfile, EventJournal, ManualClock, Timestamp};

const PASSWORD: &str = "demoPassword123";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║          Sigil Agent Identity Lifecycle Demo             ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════╝".cyan()
    );
    println!();

    let owner = Address::new("0xOwner0001");
    let third_party = Address::new("0xVerifier01");
    let clock = Arc::new(ManualClock::new(Timestamp::from_secs(1_700_000_000)));
    let mut journal = EventJournal::new();

    let mut registry = AgentRegistry::new(
        AgentProfile::new("Demo AI Agent", "Demo Assistant", "1.0.0"),
        PASSWORD,
        owner.clone(),
        Address::new("0xAgentInstance01"),
        clock.clone(),
    );
    println!("{} registry deployed, owner {}", "✓".green(), owner);

    section("1. DID document");
    for (field, value) in registry.get_all_fields() {
        println!("   {:<13} {}", field.to_string().bold(), value);
    }

    section("2. Owner updates the document");
    registry.set_fields(
        &owner,
        &["serviceUrl".to_string(), "description".to_string()],
        &[
            "https://demo-api.example.com".to_string(),
            "Demonstration assistant".to_string(),
        ],
        &mut journal,
    )?;
    println!(
        "   serviceUrl  → {}",
        registry.get_field("serviceUrl")?.green()
    );
    println!(
        "   a write to {} is rejected: {}",
        "did".bold(),
        registry
            .set_field(&owner, "did", "did:ethr:0xforged", &mut journal)
            .unwrap_err()
            .to_string()
            .red()
    );

    section("3. Key issuance");
    let token = registry.request_auth_key(&owner, PASSWORD, &mut journal)?;
    println!("   token issued: {}…", &token.as_str()[..16]);
    println!("   status: {:?}", registry.auth_key_status().status);

    section("4. Third-party verification");
    let forged = registry.verify_agent_auth(&third_party, "forged_token", &mut journal);
    println!("   forged token verifies: {}", format_bool(forged));
    let genuine = registry.verify_agent_auth(&third_party, token.as_str(), &mut journal);
    println!("   genuine token verifies: {}", format_bool(genuine));

    section("5. Expiry (time travel +24h 1s)");
    clock.advance(86_401);
    let status = registry.auth_key_status();
    println!(
        "   stored status {:?}, derived expired {}",
        status.status,
        format_bool(status.is_expired)
    );
    let after_expiry = registry.verify_agent_auth(&third_party, token.as_str(), &mut journal);
    println!("   expired token verifies: {}", format_bool(after_expiry));

    section("6. Invalidation and reissue");
    registry.invalidate_auth_key(PASSWORD, &mut journal)?;
    println!("   status: {:?}", registry.auth_key_status().status);
    let fresh = registry.request_auth_key(&owner, PASSWORD, &mut journal)?;
    assert_eq!(registry.auth_key_status().status, AuthKeyStatus::Valid);
    println!("   new token issued: {}…", &fresh.as_str()[..16]);

    section("7. Brute force and lockout");
    for attempt in 1..=5 {
        let result = registry.check_password("not-the-password");
        let info = registry.password_lock_info();
        println!(
            "   attempt {}: {} (errors {}, locked {})",
            attempt,
            result.unwrap_err().to_string().red(),
            info.error_count,
            format_bool(info.is_locked)
        );
    }
    let while_locked = registry.request_auth_key(&owner, PASSWORD, &mut journal);
    println!(
        "   correct password while locked: {}",
        while_locked.unwrap_err().to_string().red()
    );
    clock.advance(3_601);
    registry.request_auth_key(&owner, PASSWORD, &mut journal)?;
    println!(
        "   {} lock expired; correct password issues a key again",
        "✓".green()
    );

    section("8. Two-phase ownership handoff");
    let successor = Address::new("0xSuccessor1");
    registry.transfer_ownership(&owner, successor.clone(), &mut journal)?;
    println!(
        "   pending owner: {} (window {}h)",
        registry.pending_owner().expect("pending transfer"),
        TRANSFER_ACCEPT_WINDOW_SECS / 3600
    );
    clock.advance(3_600);
    registry.accept_ownership(&successor, &mut journal)?;
    println!("   owner is now {}", registry.owner().to_string().green());

    section("9. Journal");
    println!("   {} receipts recorded:", journal.count());
    for record in journal.records() {
        println!("   {} {}", record.at, record.event.kind());
    }

    println!();
    println!("{}", "Demo complete!".green().bold());
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", format!("── {title} ").yellow().bold());
}

fn format_bool(b: bool) -> ColoredString {
    if b {
        "true".green()
    } else {
        "false".red()
    }
}
