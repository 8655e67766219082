use super::prompt::Console;
use super::render;
use crate::application::session::Session;
use crate::domain::account::AuthenticatedUser;
use crate::domain::ports::{AccountApiBox, AuthApi, AuthApiBox, TransferApiBox};
use crate::error::{ClientError, Result};
use crate::interfaces::csv::history_writer::HistoryWriter;
use std::fs::File;
use std::io::{BufRead, Write};

const GREETING: &str = "*** Welcome to TE Bucks! ***";

const LOGIN_MENU: &str = "\n1: Register\n2: Login\n0: Exit\n---------";

const MAIN_MENU: &str = "\n1: View your current balance\n\
                         2: View your past transfers\n\
                         3: View your pending requests\n\
                         4: Send TE Bucks\n\
                         5: Request TE Bucks\n\
                         6: Export your transfer history\n\
                         0: Log out\n\
                         ---------";

enum Flow {
    Logout,
    Quit,
}

/// Runs the interactive client: the login menu, then the main menu for each
/// session. Logging out returns to the login menu; end of input or the exit
/// option quits.
pub async fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    auth: AuthApiBox,
    accounts: AccountApiBox,
    transfers: TransferApiBox,
) -> Result<()> {
    console.println(GREETING)?;
    loop {
        let Some(user) = login_menu(console, auth.as_ref()).await? else {
            break;
        };
        let session = match Session::open(accounts.as_ref(), transfers.as_ref(), user).await {
            Ok(session) => session,
            Err(error) => {
                console.println(&format!("Could not open your account: {error}"))?;
                continue;
            }
        };
        console.println(&format!("Logged in as {}.", session.username()))?;
        match main_menu(console, &session).await? {
            Flow::Logout => console.println("Logged out.")?,
            Flow::Quit => break,
        }
    }
    console.println("Goodbye!")?;
    Ok(())
}

async fn login_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    auth: &dyn AuthApi,
) -> Result<Option<AuthenticatedUser>> {
    loop {
        console.println(LOGIN_MENU)?;
        let Some(choice) = console.prompt_for_int("Please choose an option: ")? else {
            return Ok(None);
        };
        match choice {
            1 => {
                console.println("Please register a new user account.")?;
                let Some(credentials) = console.prompt_for_credentials()? else {
                    return Ok(None);
                };
                match auth.register(&credentials).await {
                    Ok(()) => console.println("Registration successful. You can now login.")?,
                    Err(error) => console.println(&format!("Registration failed: {error}"))?,
                }
            }
            2 => {
                let Some(credentials) = console.prompt_for_credentials()? else {
                    return Ok(None);
                };
                match auth.login(&credentials).await {
                    Ok(user) => return Ok(Some(user)),
                    Err(error) => console.println(&format!("Login failed: {error}"))?,
                }
            }
            0 => return Ok(None),
            _ => console.println("Invalid Selection")?,
        }
    }
}

async fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<Flow> {
    loop {
        console.println(MAIN_MENU)?;
        let Some(choice) = console.prompt_for_int("Please choose an option: ")? else {
            return Ok(Flow::Quit);
        };
        match choice {
            1 => view_balance(console, session).await?,
            2 => view_history(console, session).await?,
            3 => review_pending(console, session).await?,
            4 => send_bucks(console, session).await?,
            5 => request_bucks(console, session).await?,
            6 => export_history(console, session).await?,
            0 => return Ok(Flow::Logout),
            _ => console.println("Invalid Selection")?,
        }
    }
}

async fn view_balance<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    match session.balance().await {
        Ok(balance) => console.println(&format!("Your current account balance is: {balance}")),
        Err(error) => console.println(&format!("Could not fetch balance: {error}")),
    }
}

async fn view_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    let rows = match session.history_rows().await {
        Ok(rows) => rows,
        Err(error) => return console.println(&format!("Could not fetch transfers: {error}")),
    };
    if rows.is_empty() {
        return console.println("No transfer history.");
    }
    console.println(&render::history_table(&rows))?;
    loop {
        let Some(id) =
            console.prompt_for_int("Enter the ID of the transfer you'd like to view (0 to cancel): ")?
        else {
            return Ok(());
        };
        if id == 0 {
            return Ok(());
        }
        match session.transfer_details(id).await {
            Ok(details) => {
                console.println(&render::details_block(&details))?;
                return Ok(());
            }
            Err(_) => console.println("Invalid transfer ID, please try again.")?,
        }
    }
}

async fn review_pending<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    loop {
        let rows = match session.pending_rows().await {
            Ok(rows) => rows,
            Err(error) => {
                return console.println(&format!("Could not fetch pending requests: {error}"));
            }
        };
        if rows.is_empty() {
            return console.println("No pending requests.");
        }
        console.println(&render::pending_table(&rows))?;
        let Some(id) =
            console.prompt_for_int("Please enter transfer ID to approve/reject (0 to cancel): ")?
        else {
            return Ok(());
        };
        if id == 0 {
            return Ok(());
        }
        if !rows.iter().any(|row| row.transfer_id == id) {
            console.println("Invalid transfer ID, please try again.")?;
            continue;
        }
        console.println("1: Approve\n2: Reject\n0: Don't approve or reject\n---------")?;
        let Some(choice) = console.prompt_for_int("Please choose an option: ")? else {
            return Ok(());
        };
        match choice {
            1 => match session.approve(id).await {
                Ok(_) => console.println("Transfer Approved!")?,
                Err(error) => console.println(&format!("Could not approve transfer: {error}"))?,
            },
            2 => match session.reject(id).await {
                Ok(_) => console.println("Transfer Rejected!")?,
                Err(error) => console.println(&format!("Could not reject transfer: {error}"))?,
            },
            0 => {}
            _ => console.println("Invalid Selection")?,
        }
    }
}

async fn send_bucks<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    let users = match session.other_users().await {
        Ok(users) => users,
        Err(error) => return console.println(&format!("Could not fetch users: {error}")),
    };
    if users.is_empty() {
        return console.println("There are no other users yet.");
    }
    console.println(&render::users_table(&users))?;

    let to_user = loop {
        let Some(id) = console
            .prompt_for_int("Enter the ID of the user you want to send money to (0 to cancel): ")?
        else {
            return Ok(());
        };
        if id == 0 {
            return Ok(());
        }
        if users.iter().any(|user| user.id == id) {
            break id;
        }
        console.println("Invalid User ID, please try again.")?;
    };

    loop {
        let Some(amount) = console.prompt_for_decimal("Enter amount to send: ")? else {
            return Ok(());
        };
        match session.send_bucks(to_user, amount).await {
            Ok(transfer) => {
                console.println(&format!("Successfully sent: {}", transfer.amount))?;
                match session.balance().await {
                    Ok(balance) => console.println(&format!("Your new balance is: {balance}"))?,
                    Err(error) => console.println(&format!("Could not fetch balance: {error}"))?,
                }
                return Ok(());
            }
            Err(error @ (ClientError::Validation(_) | ClientError::InsufficientFunds { .. })) => {
                console.println(&format!("{error}"))?;
            }
            Err(error) => return console.println(&format!("Could not send transfer: {error}")),
        }
    }
}

async fn request_bucks<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    let users = match session.other_users().await {
        Ok(users) => users,
        Err(error) => return console.println(&format!("Could not fetch users: {error}")),
    };
    if users.is_empty() {
        return console.println("There are no other users yet.");
    }
    console.println(&render::users_table(&users))?;

    let from_user = loop {
        let Some(id) = console
            .prompt_for_int("Enter the ID of the user you are requesting from (0 to cancel): ")?
        else {
            return Ok(());
        };
        if id == 0 {
            return Ok(());
        }
        if users.iter().any(|user| user.id == id) {
            break id;
        }
        console.println("Invalid User ID, please try again.")?;
    };

    loop {
        let Some(amount) = console.prompt_for_decimal("Enter request amount: ")? else {
            return Ok(());
        };
        match session.request_bucks(from_user, amount).await {
            Ok(_) => {
                console.println("Request sent successfully.")?;
                return Ok(());
            }
            Err(error @ ClientError::Validation(_)) => {
                console.println(&format!("{error}"))?;
            }
            Err(error) => return console.println(&format!("Could not send request: {error}")),
        }
    }
}

async fn export_history<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &Session<'_>,
) -> Result<()> {
    let rows = match session.history_rows().await {
        Ok(rows) => rows,
        Err(error) => return console.println(&format!("Could not fetch transfers: {error}")),
    };
    if rows.is_empty() {
        return console.println("No transfer history to export.");
    }
    let Some(path) = console.prompt("Enter a file path for the export (blank to cancel): ")? else {
        return Ok(());
    };
    let path = path.trim().to_string();
    if path.is_empty() {
        return Ok(());
    }
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(error) => return console.println(&format!("Could not create {path}: {error}")),
    };
    let mut writer = HistoryWriter::new(file);
    match writer.write_rows(&rows) {
        Ok(()) => console.println(&format!("Exported {} transfers to {path}.", rows.len())),
        Err(error) => console.println(&format!("Export failed: {error}")),
    }
}
