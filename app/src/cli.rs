// storefront/app/src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront::{BookingStatus, OrderStatus, StockFilter};

/// Storefront: catalog, carts, orders and bookings kept in a local data directory.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, long_about = None)]
pub struct Cli {
  /// Data directory (overrides STOREFRONT_DATA_DIR)
  #[arg(long, global = true)]
  pub data_dir: Option<PathBuf>,

  /// Sign in as this user before running the command
  #[arg(short, long, global = true)]
  pub user: Option<String>,

  /// Emit log lines as JSON (overrides STOREFRONT_LOG_JSON)
  #[arg(long, global = true)]
  pub log_json: bool,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// List the catalog
  Products {
    #[arg(long)]
    search: Option<String>,
    /// all, low-stock or out-of-stock
    #[arg(long, default_value = "all")]
    filter: StockFilter,
  },
  /// Manage the catalog (admin)
  Product {
    #[command(subcommand)]
    action: ProductCommand,
  },
  /// Create a customer account
  Register { username: String, name: String },
  /// Inspect or change the signed-in user's cart
  Cart {
    #[command(subcommand)]
    action: CartCommand,
  },
  /// Place an order for the cart
  Checkout {
    /// Free-form order detail, e.g. --detail address="1 Main St"
    #[arg(long = "detail", value_parser = parse_detail)]
    details: Vec<(String, String)>,
  },
  /// List orders visible to the signed-in user
  Orders,
  Order {
    #[command(subcommand)]
    action: OrderCommand,
  },
  Notifications,
  /// Manage notifications (admin)
  Notify {
    #[command(subcommand)]
    action: NotifyCommand,
  },
  /// List bookings visible to the signed-in user
  Bookings,
  Booking {
    #[command(subcommand)]
    action: BookingCommand,
  },
  /// Sales summary and recent orders
  Dashboard,
}

#[derive(Debug, Subcommand)]
pub enum ProductCommand {
  Add {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    price: f64,
    #[arg(long, default_value_t = 1)]
    stock: u32,
    #[arg(long, default_value = "")]
    image: String,
  },
  Update {
    id: u64,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    stock: Option<u32>,
    #[arg(long)]
    image: Option<String>,
  },
  Delete {
    id: u64,
  },
  /// Restore the sample catalog
  Reset,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
  Show,
  Add {
    id: u64,
    #[arg(long, default_value_t = 1)]
    qty: u32,
  },
  /// Set a line's quantity; zero or less removes it
  Set {
    id: u64,
    #[arg(allow_hyphen_values = true)]
    qty: i64,
  },
  Remove {
    id: u64,
  },
}

#[derive(Debug, Subcommand)]
pub enum OrderCommand {
  /// Move an order to a new status (admin)
  Status { id: u64, status: OrderStatus },
  /// Cancel one of your pending orders
  Cancel { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum NotifyCommand {
  Post { title: String, message: String },
  Remove { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum BookingCommand {
  /// Request a service appointment; DATE is RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD (UTC)
  Request { service: String, date: String },
  /// Confirm or cancel a booking (admin)
  Status { id: u64, status: BookingStatus },
}

fn parse_detail(raw: &str) -> Result<(String, String), String> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
  let key = key.trim();
  if key.is_empty() {
    return Err(format!("missing key in '{raw}'"));
  }
  Ok((key.to_string(), value.trim().to_string()))
}
