// Walkthrough of the reservation system against the store directory from HOTEL_DATA_DIR

use anyhow::{Context, Result};
use hotel_reservations::{CustomerUpdate, HotelUpdate, ReservationLedger, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_logger()?;

    let config = StoreConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating {}", config.data_dir.display()))?;
    tracing::info!(data_dir = %config.data_dir.display(), "starting demo");

    // Start from empty stores
    for path in [
        config.customers_path(),
        config.hotels_path(),
        config.reservations_path(),
    ] {
        if path.exists() {
            std::fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        }
    }

    let ledger = ReservationLedger::from_config(&config);
    let customers = ledger.customers();
    let hotels = ledger.hotels();

    print_section("Creating Customers");
    let c1 = customers.create("C001", "Juan Perez", "juan.perez@gmail.com", "555-0101");
    println!(" Created customer: {}", c1.name);
    let c2 = customers.create("C002", "Maria Lopez", "maria.lopez@gmail.com", "555-0102");
    println!(" Created customer: {}", c2.name);

    print_section("Customer Information");
    print_display(customers.get_display("C001"));

    print_section("Creating Hotels");
    let h1 = hotels.create("H001", "Grand Plaza Hotel", "New York, NY", 150);
    println!(" Created hotel: {} ({} rooms)", h1.name, h1.total_rooms);
    let h2 = hotels.create("H002", "Seaside Resort", "Miami, FL", 200);
    println!(" Created hotel: {} ({} rooms)", h2.name, h2.total_rooms);

    print_section("Hotel Information");
    print_display(hotels.get_display("H001"));

    print_section("Creating Reservations");
    if let Some(r) = ledger.create("R001", "C001", "H001", "2026-03-15", "2026-03-20") {
        println!(" Created reservation {}", r.reservation_id);
        println!("  Customer: {}", r.customer_id);
        println!("  Hotel: {}", r.hotel_id);
        println!("  Check-in: {}", r.check_in);
        println!("  Check-out: {}", r.check_out);
        if let Some(nights) = r.nights() {
            println!("  Nights: {}", nights);
        }
    }
    if let Some(r) = ledger.create("R002", "C002", "H002", "2026-04-01", "2026-04-07") {
        println!(" Created reservation {}", r.reservation_id);
    }

    print_section("Hotel Availability After Reservations");
    print_display(hotels.get_display("H001"));

    print_section("Modifying Customer Information");
    customers.modify(
        "C001",
        CustomerUpdate::default()
            .email("juan.perez.new@email.com")
            .phone("555-9999"),
    );
    println!(" Updated customer C001");
    print_display(customers.get_display("C001"));

    print_section("Modifying Hotel Information");
    hotels.modify("H001", HotelUpdate::default().name("Grand Plaza Hotel & Spa"));
    println!(" Updated hotel H001");
    print_display(hotels.get_display("H001"));

    print_section("Cancelling Reservation");
    if ledger.cancel("R001") {
        println!(" Cancelled reservation R001");
        println!("\nHotel availability after cancellation:");
        print_display(hotels.get_display("H001"));
    }

    print_section("Testing Error Handling");

    println!("\n1. Attempting to create reservation with non-existent customer:");
    if ledger
        .create("R999", "C999", "H001", "2026-05-01", "2026-05-05")
        .is_none()
    {
        println!(" Error handled correctly");
    }

    println!("\n2. Attempting to create reservation with no available rooms:");
    hotels.create("H003", "Tiny Hotel", "Boston, MA", 0);
    if ledger
        .create("R998", "C001", "H003", "2026-05-01", "2026-05-05")
        .is_none()
    {
        println!(" Error handled correctly");
    }

    println!("\n3. Attempting to delete non-existent customer:");
    if !customers.delete("C999") {
        println!(" Error handled correctly (returned false)");
    }

    print_section("Cleanup");
    customers.delete("C001");
    println!(" Deleted customers");
    hotels.delete("H001");
    println!(" Deleted hotels");

    print_section("Demo Complete!");
    println!("Data files written under {}", config.data_dir.display());
    Ok(())
}

fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{}", title);
    println!("{}", "=".repeat(60));
}

fn print_display(display: Option<String>) {
    match display {
        Some(text) => println!("{}", text),
        None => println!("(not found)"),
    }
}

fn init_logger() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}
