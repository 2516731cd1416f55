// storefront/app/src/commands.rs

//! Runs one parsed command against an open storefront and prints the outcome.

use crate::cli::{BookingCommand, CartCommand, Commands, NotifyCommand, OrderCommand, ProductCommand};
use crate::errors::{AppError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use storefront::{Booking, KeyValueStore, Notification, Order, Product, ProductDraft, ProductPatch, Storefront};
use tracing::debug;

pub fn run<S: KeyValueStore>(sf: &mut Storefront<S>, command: Commands) -> Result<()> {
  debug!(?command, "Dispatching command.");
  match command {
    Commands::Products { search, filter } => {
      let products = sf.search_products(search.as_deref().unwrap_or(""), filter);
      if products.is_empty() {
        println!("No products match.");
      }
      for product in products {
        print_product(product);
      }
    }
    Commands::Product { action } => run_product(sf, action)?,
    Commands::Register { username, name } => {
      let user = sf.register(&username, &name)?;
      println!("Registered {} ({}).", user.username, user.name);
    }
    Commands::Cart { action } => run_cart(sf, action)?,
    Commands::Checkout { details } => {
      let details = details
        .into_iter()
        .map(|(k, v)| (k, serde_json::Value::String(v)))
        .collect();
      let order = sf.checkout(details)?;
      println!("Order placed.");
      print_order(&order);
    }
    Commands::Orders => {
      let orders = sf.visible_orders();
      if orders.is_empty() {
        println!("No orders.");
      }
      for order in orders {
        print_order(order);
      }
    }
    Commands::Order { action } => {
      let order = match action {
        OrderCommand::Status { id, status } => sf.update_order_status(id, status)?,
        OrderCommand::Cancel { id } => sf.cancel_order(id)?,
      };
      print_order(&order);
    }
    Commands::Notifications => {
      if sf.notifications().is_empty() {
        println!("No notifications.");
      }
      for notification in sf.notifications() {
        print_notification(notification);
      }
    }
    Commands::Notify { action } => match action {
      NotifyCommand::Post { title, message } => {
        let notification = sf.post_notification(&title, &message)?;
        print_notification(&notification);
      }
      NotifyCommand::Remove { id } => {
        sf.remove_notification(id)?;
        println!("Removed notification {id}.");
      }
    },
    Commands::Bookings => {
      let bookings = sf.visible_bookings();
      if bookings.is_empty() {
        println!("No bookings.");
      }
      for booking in bookings {
        print_booking(booking);
      }
    }
    Commands::Booking { action } => {
      let booking = match action {
        BookingCommand::Request { service, date } => sf.create_booking(&service, parse_booking_date(&date)?)?,
        BookingCommand::Status { id, status } => sf.update_booking_status(id, status)?,
      };
      print_booking(&booking);
    }
    Commands::Dashboard => {
      sf.session().require_admin()?;
      let summary = sf.dashboard();
      println!("Total sales:    {:.2}", summary.total_sales);
      println!("Total orders:   {}", summary.total_orders);
      println!("Total products: {}", summary.total_products);
      println!("Recent orders:");
      for order in &summary.recent_orders {
        print_order(order);
      }
    }
  }
  Ok(())
}

fn run_product<S: KeyValueStore>(sf: &mut Storefront<S>, action: ProductCommand) -> Result<()> {
  match action {
    ProductCommand::Add {
      name,
      description,
      price,
      stock,
      image,
    } => {
      let product = sf.create_product(ProductDraft {
        name,
        description,
        price,
        stock,
        image,
      })?;
      print_product(&product);
    }
    ProductCommand::Update {
      id,
      name,
      description,
      price,
      stock,
      image,
    } => {
      let patch = ProductPatch {
        name,
        description,
        price,
        stock,
        image,
      };
      if patch.is_empty() {
        return Err(AppError::Input("Nothing to update: pass at least one field.".to_string()));
      }
      print_product(&sf.update_product(id, patch)?);
    }
    ProductCommand::Delete { id } => {
      let removed = sf.delete_product(id)?;
      println!("Deleted product {} ({}).", removed.id, removed.name);
    }
    ProductCommand::Reset => {
      sf.reset_products()?;
      println!("Catalog reset to {} sample products.", sf.products().len());
    }
  }
  Ok(())
}

fn run_cart<S: KeyValueStore>(sf: &mut Storefront<S>, action: CartCommand) -> Result<()> {
  match action {
    CartCommand::Show => {
      sf.session().require_user("Please login to use the cart.")?;
    }
    CartCommand::Add { id, qty } => {
      sf.add_to_cart(id, qty)?;
    }
    CartCommand::Set { id, qty } => sf.update_cart_qty(id, qty)?,
    CartCommand::Remove { id } => sf.remove_from_cart(id)?,
  }
  if sf.cart().is_empty() {
    println!("Cart is empty.");
    return Ok(());
  }
  for line in sf.cart() {
    println!(
      "#{:<4} {:<24} {:>3} x {:>9.2} = {:>10.2}",
      line.id(),
      line.product.name,
      line.qty,
      line.product.price,
      line.line_total()
    );
  }
  println!("Total: {:.2}", sf.cart_total());
  Ok(())
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM` or a bare `YYYY-MM-DD`, the last two read as UTC.
pub(crate) fn parse_booking_date(raw: &str) -> Result<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
    return Ok(date.with_timezone(&Utc));
  }
  if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
    return Ok(date.and_utc());
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|d| d.and_utc())
    .ok_or_else(|| AppError::Input("Fill service and date.".to_string()))
}

fn print_product(product: &Product) {
  println!(
    "#{:<4} {:<24} {:>9.2}  stock {:>4}  {}",
    product.id, product.name, product.price, product.stock, product.description
  );
}

fn print_order(order: &Order) {
  println!(
    "Order {} [{}] {} ({}) total {:.2} at {}",
    order.id,
    order.status,
    order.customer_name,
    order.customer,
    order.total,
    order.created_at.to_rfc3339()
  );
  for item in &order.items {
    println!("    {} x {} @ {:.2}", item.qty, item.name, item.price);
  }
}

fn print_notification(notification: &Notification) {
  println!(
    "[{}] {} ({}): {}",
    notification.id,
    notification.title,
    notification.posted_at.to_rfc3339(),
    notification.message
  );
}

fn print_booking(booking: &Booking) {
  println!(
    "Booking {} [{}] {} on {} for {} ({})",
    booking.id,
    booking.status,
    booking.service,
    booking.date.to_rfc3339(),
    booking.customer_name,
    booking.customer
  );
}
