//! Motorlot CLI - the command-line surface over the dealership backend.
//!
//! The binary is a thin orchestration layer: every subcommand maps onto one
//! of the client flows (browse, favorites, bookings, back office), renders
//! the result, and drains the client's notice channel to stderr. All
//! business rules live server-side; errors here are printed, never fatal
//! panics.

mod output;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use motorlot_client::{ApiClient, CarDraft, ImageUpload, Notice, notice_channel};
use motorlot_config::ClientConfig;
use motorlot_types::{
    BookingId, CarFilter, CarId, CarStatus, FuelType, ImageId, PageQuery, SortDir,
    TestDriveStatus, Transmission,
};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "motorlot", about = "Browse and manage a Motorlot dealership", version)]
struct Cli {
    /// Backend base URL, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Account email for flows that need a session.
    #[arg(long, global = true, env = "MOTORLOT_EMAIL")]
    email: Option<String>,

    /// Account password for flows that need a session.
    #[arg(long, global = true, env = "MOTORLOT_PASSWORD")]
    password: Option<String>,

    /// Print raw JSON instead of formatted output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and report where the account lands (home or dashboard).
    Login,
    /// Sign out and clear the local session.
    Logout,
    /// Create a customer account from --full-name, --email and --password.
    Register {
        #[arg(long)]
        full_name: String,
    },
    /// Show the signed-in profile.
    Whoami,
    /// Update the signed-in profile.
    Profile(ProfileCommand),
    /// Browse the public catalog.
    Cars(CarsCommand),
    /// Manage saved listings.
    Favorites(FavoritesCommand),
    /// Book and manage test drives.
    TestDrive(TestDriveCommand),
    /// Back-office operations (requires an ADMIN account).
    Admin(AdminCommand),
}

#[derive(Args)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand)]
enum ProfileSubcommand {
    /// Change the display name.
    SetName {
        full_name: String,
    },
}

#[derive(Args)]
struct CarsCommand {
    #[command(subcommand)]
    command: CarsSubcommand,
}

#[derive(Args, Default)]
struct FilterArgs {
    #[arg(long)]
    make: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// MANUAL or AUTOMATIC.
    #[arg(long)]
    transmission: Option<String>,
    /// GASOLINE, DIESEL, ELECTRIC or HYBRID.
    #[arg(long)]
    fuel: Option<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<CarFilter> {
        Ok(CarFilter {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            transmission: self
                .transmission
                .as_deref()
                .map(Transmission::parse)
                .transpose()?,
            fuel_type: self.fuel.as_deref().map(FuelType::parse).transpose()?,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

#[derive(Subcommand)]
enum CarsSubcommand {
    /// One page of the catalog.
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// 0-based page index.
        #[arg(long, default_value_t = 0)]
        page: usize,
        #[arg(long)]
        size: Option<usize>,
        #[arg(long, default_value = "id")]
        sort_by: String,
        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,
    },
    /// One listing with its image gallery.
    Show {
        id: i64,
    },
}

#[derive(Args)]
struct FavoritesCommand {
    #[command(subcommand)]
    command: FavoritesSubcommand,
}

#[derive(Subcommand)]
enum FavoritesSubcommand {
    Add {
        car_id: i64,
    },
    Remove {
        car_id: i64,
    },
    List {
        /// Show full listings instead of bare (user, car) pairs.
        #[arg(long)]
        detailed: bool,
    },
}

#[derive(Args)]
struct TestDriveCommand {
    #[command(subcommand)]
    command: TestDriveSubcommand,
}

#[derive(Subcommand)]
enum TestDriveSubcommand {
    /// Book a slot, e.g. `book 5 "2026-08-20 14:30"`.
    Book {
        car_id: i64,
        /// Appointment in dealership-local time: YYYY-MM-DD HH:MM.
        at: String,
    },
    /// Your bookings.
    List,
    /// Cancel a PENDING booking and show the remaining list.
    Cancel {
        id: i64,
    },
}

#[derive(Args)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand)]
enum AdminSubcommand {
    Cars(AdminCarsCommand),
    Images(AdminImagesCommand),
    TestDrives(AdminTestDrivesCommand),
}

#[derive(Args)]
struct AdminCarsCommand {
    #[command(subcommand)]
    command: AdminCarsSubcommand,
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    make: String,
    #[arg(long)]
    model: String,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    price: f64,
    /// MANUAL or AUTOMATIC.
    #[arg(long)]
    transmission: String,
    /// GASOLINE, DIESEL, ELECTRIC or HYBRID.
    #[arg(long)]
    fuel: String,
    #[arg(long)]
    description: Option<String>,
}

impl DraftArgs {
    fn to_draft(&self) -> Result<CarDraft> {
        Ok(CarDraft {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            price: self.price,
            transmission: Transmission::parse(&self.transmission)?,
            fuel_type: FuelType::parse(&self.fuel)?,
            description: self.description.clone(),
        })
    }
}

#[derive(Subcommand)]
enum AdminCarsSubcommand {
    /// Full inventory, soft-deleted listings included.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Show {
        id: i64,
    },
    Create {
        #[command(flatten)]
        draft: DraftArgs,
        /// Image files to upload with the listing.
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        /// Index into the uploaded images to mark primary.
        #[arg(long)]
        primary_index: Option<usize>,
    },
    Update {
        id: i64,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Soft-delete a listing.
    Delete {
        id: i64,
    },
    Restore {
        id: i64,
    },
    /// AVAILABLE or SOLD.
    SetStatus {
        id: i64,
        status: String,
    },
}

#[derive(Args)]
struct AdminImagesCommand {
    #[command(subcommand)]
    command: AdminImagesSubcommand,
}

#[derive(Subcommand)]
enum AdminImagesSubcommand {
    Add {
        car_id: i64,
        /// Image files to upload.
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
        #[arg(long)]
        primary_index: Option<usize>,
    },
    SetPrimary {
        car_id: i64,
        image_id: i64,
    },
    Delete {
        car_id: i64,
        image_id: i64,
    },
}

#[derive(Args)]
struct AdminTestDrivesCommand {
    #[command(subcommand)]
    command: AdminTestDrivesSubcommand,
}

#[derive(Subcommand)]
enum AdminTestDrivesSubcommand {
    /// Every booking in the system.
    List,
    /// PENDING, APPROVED, REJECTED or COMPLETED.
    SetStatus {
        id: i64,
        status: String,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let (client, notices, config) = match build_client(&cli) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    };

    let result = run(&cli, &client, &config).await;
    drain_notices(notices);

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn build_client(cli: &Cli) -> Result<(ApiClient, UnboundedReceiver<Notice>, ClientConfig)> {
    let mut config = ClientConfig::load().context("loading configuration")?;
    if let Some(api_url) = &cli.api_url {
        config = config
            .with_api_base_url(api_url)
            .context("applying --api-url")?;
    }

    let (sender, receiver) = notice_channel();
    let client = ApiClient::new(&config, sender).context("building HTTP client")?;
    tracing::debug!(api_base = %config.api_base_url(), "Client ready");
    Ok((client, receiver, config))
}

/// Print buffered notices after the command settles. Stderr so JSON output
/// stays clean.
fn drain_notices(mut notices: UnboundedReceiver<Notice>) {
    while let Ok(notice) = notices.try_recv() {
        let text = match notice {
            Notice::SessionExpired { redirected: true } => {
                "session expired - please sign in again".to_owned()
            }
            Notice::SessionExpired { redirected: false } => "session expired".to_owned(),
            Notice::PermissionDenied => {
                "access denied - this action needs a different role".to_owned()
            }
            Notice::ServiceUnavailable { status } => {
                format!("the dealership service is unavailable (HTTP {status})")
            }
            Notice::BackendUnreachable => {
                "network error - is the backend server running?".to_owned()
            }
            Notice::LoginRequired => "please sign in first (see `motorlot login`)".to_owned(),
        };
        eprintln!("note: {text}");
    }
}

/// Sign in when credentials were supplied; flows that need a session fail
/// with their own guard or a 401 otherwise.
async fn maybe_sign_in(cli: &Cli, client: &ApiClient) -> Result<()> {
    if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
        client.auth().sign_in(email, password).await?;
    }
    Ok(())
}

async fn run(cli: &Cli, client: &ApiClient, config: &ClientConfig) -> Result<()> {
    match &cli.command {
        Command::Login => {
            let (Some(email), Some(password)) = (&cli.email, &cli.password) else {
                bail!("--email and --password (or MOTORLOT_EMAIL / MOTORLOT_PASSWORD) are required");
            };
            let signed_in = client.auth().sign_in(email, password).await?;
            println!(
                "signed in as {} ({})",
                signed_in.user.full_name, signed_in.user.role
            );
            println!("landing: {}", signed_in.destination);
        }
        Command::Logout => {
            maybe_sign_in(cli, client).await?;
            let ack = client.auth().logout().await?;
            println!("{ack}");
        }
        Command::Register { full_name } => {
            let (Some(email), Some(password)) = (&cli.email, &cli.password) else {
                bail!("--email and --password are required to register");
            };
            let ack = client.auth().register(full_name, email, password).await?;
            println!("{ack}");
        }
        Command::Whoami => {
            maybe_sign_in(cli, client).await?;
            let user = client.auth().me().await?;
            if cli.json {
                output::json(&user)?;
            } else {
                println!("{} <{}> [{}]", user.full_name, user.email, user.role);
            }
        }
        Command::Profile(profile) => {
            let ProfileSubcommand::SetName { full_name } = &profile.command;
            maybe_sign_in(cli, client).await?;
            let user = client.auth().update_profile(full_name).await?;
            println!("profile updated: {} <{}>", user.full_name, user.email);
        }
        Command::Cars(cars) => run_cars(cli, client, config, cars).await?,
        Command::Favorites(favorites) => run_favorites(cli, client, favorites).await?,
        Command::TestDrive(test_drive) => run_test_drive(cli, client, test_drive).await?,
        Command::Admin(admin) => run_admin(cli, client, admin).await?,
    }
    Ok(())
}

async fn run_cars(
    cli: &Cli,
    client: &ApiClient,
    config: &ClientConfig,
    cars: &CarsCommand,
) -> Result<()> {
    match &cars.command {
        CarsSubcommand::List {
            filter,
            page,
            size,
            sort_by,
            desc,
        } => {
            let filter = filter.to_filter()?;
            let query = PageQuery {
                page: *page,
                size: size.unwrap_or_else(|| config.default_page_size()),
                sort_by: sort_by.clone(),
                sort_dir: if *desc { SortDir::Desc } else { SortDir::Asc },
            };
            let result = client.cars().list(&filter, &query).await?;
            if cli.json {
                output::json(&result)?;
            } else {
                output::page(&result);
            }
        }
        CarsSubcommand::Show { id } => {
            let car = client.cars().get(CarId::new(*id)).await?;
            if cli.json {
                output::json(&car)?;
            } else {
                output::car_details(&car, client);
            }
        }
    }
    Ok(())
}

async fn run_favorites(cli: &Cli, client: &ApiClient, favorites: &FavoritesCommand) -> Result<()> {
    maybe_sign_in(cli, client).await?;
    match &favorites.command {
        FavoritesSubcommand::Add { car_id } => {
            let favorite = client.favorites().add(CarId::new(*car_id)).await?;
            println!("saved car #{}", favorite.car_id);
        }
        FavoritesSubcommand::Remove { car_id } => {
            let ack = client.favorites().remove(CarId::new(*car_id)).await?;
            println!("{ack}");
        }
        FavoritesSubcommand::List { detailed } => {
            if *detailed {
                let cars = client.favorites().list_with_details().await?;
                if cli.json {
                    output::json(&cars)?;
                } else {
                    output::cars(&cars);
                }
            } else {
                let favorites = client.favorites().list().await?;
                if cli.json {
                    output::json(&favorites)?;
                } else {
                    for favorite in &favorites {
                        println!(
                            "car #{}  saved {}",
                            favorite.car_id,
                            favorite.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                    println!("{} favorite(s)", favorites.len());
                }
            }
        }
    }
    Ok(())
}

async fn run_test_drive(cli: &Cli, client: &ApiClient, command: &TestDriveCommand) -> Result<()> {
    maybe_sign_in(cli, client).await?;
    match &command.command {
        TestDriveSubcommand::Book { car_id, at } => {
            let appointment = output::parse_appointment(at)?;
            let booking = client
                .test_drives()
                .book(CarId::new(*car_id), appointment)
                .await?;
            println!(
                "booked {} on {} (status {})",
                booking.car_label(),
                booking.appointment_date.format("%Y-%m-%d %H:%M"),
                booking.status
            );
        }
        TestDriveSubcommand::List => {
            let bookings = client.test_drives().my_bookings().await?;
            if cli.json {
                output::json(&bookings)?;
            } else {
                output::bookings(&bookings);
            }
        }
        TestDriveSubcommand::Cancel { id } => {
            let id = BookingId::new(*id);
            let bookings = client.test_drives().my_bookings().await?;
            let Some(target) = bookings.iter().find(|b| b.id == id) else {
                bail!("no booking #{id} on your account");
            };
            if !target.status.is_cancellable() {
                bail!(
                    "booking #{id} is {} - only PENDING bookings can be cancelled",
                    target.status
                );
            }

            let ack = client.test_drives().cancel(id).await?;
            println!("{ack}");

            // The list the user keeps seeing, minus the cancelled row.
            let remaining: Vec<_> = bookings.into_iter().filter(|b| b.id != id).collect();
            output::bookings(&remaining);
        }
    }
    Ok(())
}

async fn run_admin(cli: &Cli, client: &ApiClient, admin: &AdminCommand) -> Result<()> {
    maybe_sign_in(cli, client).await?;
    match &admin.command {
        AdminSubcommand::Cars(cars) => match &cars.command {
            AdminCarsSubcommand::List { filter } => {
                let cars = client.admin_cars().list(&filter.to_filter()?).await?;
                if cli.json {
                    output::json(&cars)?;
                } else {
                    output::cars(&cars);
                }
            }
            AdminCarsSubcommand::Show { id } => {
                let car = client.admin_cars().get(CarId::new(*id)).await?;
                if cli.json {
                    output::json(&car)?;
                } else {
                    output::car_details(&car, client);
                }
            }
            AdminCarsSubcommand::Create {
                draft,
                images,
                primary_index,
            } => {
                let uploads = read_images(images)?;
                let car = client
                    .admin_cars()
                    .create(&draft.to_draft()?, &uploads, *primary_index)
                    .await?;
                println!("created listing #{}: {}", car.id, car.label());
            }
            AdminCarsSubcommand::Update { id, draft } => {
                let car = client
                    .admin_cars()
                    .update(CarId::new(*id), &draft.to_draft()?)
                    .await?;
                println!("updated listing #{}: {}", car.id, car.label());
            }
            AdminCarsSubcommand::Delete { id } => {
                let ack = client.admin_cars().delete(CarId::new(*id)).await?;
                println!("{ack}");
            }
            AdminCarsSubcommand::Restore { id } => {
                let car = client.admin_cars().restore(CarId::new(*id)).await?;
                println!("restored listing #{}: {}", car.id, car.label());
            }
            AdminCarsSubcommand::SetStatus { id, status } => {
                let status = CarStatus::parse(status)?;
                let car = client.admin_cars().set_status(CarId::new(*id), status).await?;
                println!("listing #{} is now {}", car.id, car.status);
            }
        },
        AdminSubcommand::Images(images) => match &images.command {
            AdminImagesSubcommand::Add {
                car_id,
                images,
                primary_index,
            } => {
                let uploads = read_images(images)?;
                let car = client
                    .admin_cars()
                    .add_images(CarId::new(*car_id), &uploads, *primary_index)
                    .await?;
                println!("listing #{} now has {} image(s)", car.id, car.images.len());
            }
            AdminImagesSubcommand::SetPrimary { car_id, image_id } => {
                let car = client
                    .admin_cars()
                    .set_primary_image(CarId::new(*car_id), ImageId::new(*image_id))
                    .await?;
                println!(
                    "primary image of listing #{} is now {}",
                    car.id,
                    car.primary_image.as_deref().unwrap_or("(unset)")
                );
            }
            AdminImagesSubcommand::Delete { car_id, image_id } => {
                let ack = client
                    .admin_cars()
                    .delete_image(CarId::new(*car_id), ImageId::new(*image_id))
                    .await?;
                println!("{ack}");
            }
        },
        AdminSubcommand::TestDrives(test_drives) => match &test_drives.command {
            AdminTestDrivesSubcommand::List => {
                let bookings = client.admin_test_drives().list().await?;
                if cli.json {
                    output::json(&bookings)?;
                } else {
                    output::bookings(&bookings);
                }
            }
            AdminTestDrivesSubcommand::SetStatus { id, status } => {
                let status = TestDriveStatus::parse(status)?;
                let booking = client
                    .admin_test_drives()
                    .set_status(BookingId::new(*id), status)
                    .await?;
                println!("booking #{} is now {}", booking.id, booking.status);
            }
        },
    }
    Ok(())
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageUpload>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_owned());
            Ok(ImageUpload { file_name, bytes })
        })
        .collect()
}
