//! Headless line-command shell
//!
//! Drives the store the way a device frontend would: every command maps
//! to the dispatches the corresponding screen performs, notifications
//! surface through the notifier, and navigation/fetch results are
//! printed from the broadcast action stream.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{broadcast, mpsc};
use url::Url;

use stockpile_api::auth::UserClient;
use stockpile_api::client::ApiClient;
use stockpile_api::inventory::HttpInventoryApi;
use stockpile_api::token::{FileTokenStore, TokenStore};
use stockpile_core::device::Notify;
use stockpile_core::messages;
use stockpile_core::prelude::*;
use stockpile_core::types::{Credentials, ItemFilter, KitModel, RentalDetails, RentalKind};

use stockpile_app::{
    selectors, Action, AppAction, AppState, BrandsAction, CategoriesAction, ItemForm, ItemsAction,
    KitModelsAction, LayoutAction, ModelsAction, RentalsAction, Screen, Settings, Store,
    StoreHandle,
};

/// Prints notifications to the terminal in place of the device toast.
struct TerminalNotifier;

impl Notify for TerminalNotifier {
    fn show(&self, message: &str) {
        println!("* {}", message);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run(settings: Settings) -> Result<()> {
    let base_url = Url::parse(&settings.api_url)
        .map_err(|e| Error::config(format!("invalid API URL {:?}: {}", settings.api_url, e)))?;

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::at_default_location());
    let client = Arc::new(ApiClient::connect(base_url, tokens, settings.request_timeout()).await?);
    info!("connected to {}", client.base_url());
    let user = UserClient::new(client.clone());
    let api = Arc::new(HttpInventoryApi::new(client));

    if user.is_logged_in() {
        match user.current_user().await {
            Ok(account) => println!("Logged in as {} {}", account.first_name, account.last_name),
            Err(err) if err.is_auth_error() => {
                println!("Stored session expired. Use: login <email> <password>");
            }
            Err(err) => warn!("could not fetch the account: {}", err),
        }
    } else {
        println!("Not logged in. Use: login <email> <password>");
    }

    let (store, handle) = Store::new(api, Arc::new(TerminalNotifier));
    let store_task = tokio::spawn(store.run());
    let mut events = handle.subscribe();

    // Blocking reader thread; lines flow into the async loop.
    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);
    std::thread::spawn(move || read_lines_blocking(line_tx));

    println!("Stockpile shell ready. Type 'help' for commands.");

    loop {
        tokio::select! {
            line = line_rx.recv() => match line {
                Some(line) => match run_command(&line, &handle, &user).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(err) => {
                        error!("dispatch failed: {}", err);
                        break;
                    }
                },
                // Stdin closed (piped input ran out).
                None => break,
            },
            event = events.recv() => match event {
                Ok(action) => print_event(&action, &handle),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    handle.close();
    let _ = store_task.await;
    info!("Stockpile shell exiting");
    Ok(())
}

/// Reads stdin line by line and forwards non-empty lines. Runs on a
/// plain thread; exits when the channel closes or on "quit".
fn read_lines_blocking(line_tx: mpsc::Sender<String>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("failed to read stdin: {}", err);
                break;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let quit = matches!(trimmed, "quit" | "q");
        if line_tx.blocking_send(trimmed.to_string()).is_err() || quit {
            break;
        }
    }
    info!("stdin reader exiting");
}

async fn run_command(line: &str, handle: &StoreHandle, user: &UserClient) -> Result<Flow> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(Flow::Continue);
    };
    let args: Vec<&str> = parts.collect();

    match command {
        "help" | "?" => print_help(),
        "quit" | "q" => return Ok(Flow::Quit),

        "login" => match args.as_slice() {
            [email, password] => {
                let credentials = Credentials {
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                };
                match user.login(&credentials).await {
                    Ok(()) => println!("Logged in."),
                    Err(err) => println!("! {}", err.user_message()),
                }
            }
            _ => println!("usage: login <email> <password>"),
        },
        "logout" => match user.logout() {
            Ok(()) => println!("Logged out."),
            Err(err) => println!("! {}", err.user_message()),
        },
        "whoami" => match user.current_user().await {
            Ok(account) => println!(
                "{} {} <{}>",
                account.first_name, account.last_name, account.email
            ),
            Err(err) => println!("! {}", err.user_message()),
        },
        "account" => match args.as_slice() {
            [first_name, last_name] => match user.current_user().await {
                Ok(mut account) => {
                    account.first_name = (*first_name).to_string();
                    account.last_name = (*last_name).to_string();
                    match user.edit_user(&account).await {
                        Ok(_) => println!("* {}", messages::USER_EDITED),
                        Err(err) => println!("! {}", err.user_message()),
                    }
                }
                Err(err) => println!("! {}", err.user_message()),
            },
            _ => println!("usage: account <first-name> <last-name>"),
        },
        "passwd" => match args.as_slice() {
            [old_password, new_password] => {
                match user.change_password(old_password, new_password).await {
                    Ok(()) => println!("* {}", messages::PASSWORD_CHANGED),
                    Err(err) => println!("! {}", err.user_message()),
                }
            }
            _ => println!("usage: passwd <current> <new>"),
        },

        "brands" => handle.dispatch(BrandsAction::Fetch).await?,
        "models" => handle.dispatch(ModelsAction::Fetch).await?,
        "categories" => handle.dispatch(CategoriesAction::Fetch).await?,
        "filter" => match args.as_slice() {
            [slice, rest @ ..] => {
                let query = rest.join(" ");
                match *slice {
                    "brands" => handle.dispatch(BrandsAction::Filter { query }).await?,
                    "models" => handle.dispatch(ModelsAction::Filter { query }).await?,
                    "categories" => {
                        handle.dispatch(CategoriesAction::Filter { query }).await?;
                    }
                    _ => println!("usage: filter <brands|models|categories> [query]"),
                }
            }
            _ => println!("usage: filter <brands|models|categories> [query]"),
        },
        "new-brand" => match args.as_slice() {
            [] => println!("usage: new-brand <name>"),
            name => {
                handle
                    .dispatch(BrandsAction::Create {
                        name: name.join(" "),
                    })
                    .await?;
            }
        },
        "new-model" => match args.as_slice() {
            [brand_id, name @ ..] if !name.is_empty() => match brand_id.parse() {
                Ok(brand_id) => {
                    handle
                        .dispatch(ModelsAction::Create {
                            brand_id,
                            name: name.join(" "),
                        })
                        .await?;
                }
                Err(_) => println!("! {:?} is not a brand id", brand_id),
            },
            _ => println!("usage: new-model <brand_id> <name>"),
        },
        "new-category" => match args.as_slice() {
            [] => println!("usage: new-category <name>"),
            name => {
                handle
                    .dispatch(CategoriesAction::Create {
                        name: name.join(" "),
                    })
                    .await?;
            }
        },

        "items" => {
            handle
                .dispatch(ItemsAction::FetchItems {
                    filter: ItemFilter::default(),
                })
                .await?;
        }
        "fields" => match args.as_slice() {
            [barcode] => {
                handle
                    .dispatch(ItemsAction::FetchItemCustomFields {
                        barcode: (*barcode).to_string(),
                    })
                    .await?;
            }
            _ => println!("usage: fields <barcode>"),
        },
        "fields-for" => match args.as_slice() {
            [category_id] => match category_id.parse() {
                Ok(category_id) => {
                    handle
                        .dispatch(ItemsAction::FetchCustomFieldsByCategory { category_id })
                        .await?;
                }
                Err(_) => println!("! {:?} is not a category id", category_id),
            },
            _ => println!("usage: fields-for <category_id>"),
        },
        "new-item" => return new_item(&args, handle).await,
        "delete-item" => match args.as_slice() {
            [barcode] => {
                handle
                    .dispatch(LayoutAction::ShowLoadingMessage {
                        message: messages::DELETING_ITEM.to_string(),
                    })
                    .await?;
                handle
                    .dispatch(ItemsAction::DeleteItem {
                        barcode: (*barcode).to_string(),
                    })
                    .await?;
            }
            _ => println!("usage: delete-item <barcode>"),
        },

        "kit" => match args.as_slice() {
            [kit_id] => match kit_id.parse() {
                Ok(kit_id) => handle.dispatch(KitModelsAction::Fetch { kit_id }).await?,
                Err(_) => println!("! {:?} is not a kit id", kit_id),
            },
            _ => println!("usage: kit <kit_id>"),
        },
        "kit-add" => return kit_add(&args, handle).await,
        "kit-commit" => {
            let kit_models = handle.state().kit_models.temp_kit_models;
            if kit_models.is_empty() {
                println!("Kit is empty. Use: kit-add <model_id> <quantity>");
            } else {
                handle
                    .dispatch(LayoutAction::ShowLoadingMessage {
                        message: messages::CREATING_ITEMS.to_string(),
                    })
                    .await?;
                handle.dispatch(ItemsAction::CreateItems { kit_models }).await?;
            }
        }

        "rent" => match args.as_slice() {
            [barcode] => {
                handle
                    .dispatch(LayoutAction::ShowLoadingMessage {
                        message: messages::FETCHING_ITEM.to_string(),
                    })
                    .await?;
                handle
                    .dispatch(RentalsAction::StartRental {
                        barcode: (*barcode).to_string(),
                    })
                    .await?;
            }
            _ => println!("usage: rent <barcode>"),
        },
        "add" => match args.as_slice() {
            [barcode] => {
                handle
                    .dispatch(LayoutAction::ShowLoadingMessage {
                        message: messages::FETCHING_ITEM.to_string(),
                    })
                    .await?;
                handle
                    .dispatch(RentalsAction::AddToRentals {
                        barcode: (*barcode).to_string(),
                    })
                    .await?;
            }
            _ => println!("usage: add <barcode>"),
        },
        "remove" => match args.as_slice() {
            [barcode] => {
                handle
                    .dispatch(RentalsAction::RemoveFromRentals {
                        barcode: (*barcode).to_string(),
                    })
                    .await?;
            }
            _ => println!("usage: remove <barcode>"),
        },
        "review" => handle.dispatch(RentalsAction::Review).await?,
        "submit" => return submit(&args, handle).await,
        "checklist" => print_checklist(&handle.state()),
        "state" => print_state(&handle.state()),

        _ => println!("Unknown command {:?}. Type 'help' for commands.", command),
    }

    Ok(Flow::Continue)
}

/// Builds an item through the form, exactly as the editor screen does,
/// resolving the picker ids against the already fetched catalogs.
async fn new_item(args: &[&str], handle: &StoreHandle) -> Result<Flow> {
    let [barcode, brand_id, model_id, category_id] = args else {
        println!("usage: new-item <barcode> <brand_id> <model_id> <category_id>");
        return Ok(Flow::Continue);
    };
    let (Ok(brand_id), Ok(model_id), Ok(category_id)) = (
        brand_id.parse::<i64>(),
        model_id.parse::<i64>(),
        category_id.parse::<i64>(),
    ) else {
        println!("! ids must be numeric");
        return Ok(Flow::Continue);
    };

    let state = handle.state();
    let Some(brand) = state.brands.results.get(&brand_id).cloned() else {
        println!("! unknown brand {} (run 'brands' first)", brand_id);
        return Ok(Flow::Continue);
    };
    let Some(model) = state.models.results.get(&model_id).cloned() else {
        println!("! unknown model {} (run 'models' first)", model_id);
        return Ok(Flow::Continue);
    };
    let Some(category) = state.categories.results.get(&category_id).cloned() else {
        println!("! unknown category {} (run 'categories' first)", category_id);
        return Ok(Flow::Continue);
    };

    let mut form = ItemForm::add();
    form.set_barcode(*barcode);
    form.set_brand(brand);
    form.set_model(model);
    // The shell has no custom-field inputs, so the fetch the category
    // change would trigger is dropped.
    let _ = form.set_category(category);

    match form.save() {
        Ok(actions) => {
            for action in actions {
                handle.dispatch(action).await?;
            }
        }
        Err(errors) => {
            for error in [errors.brand, errors.model, errors.category].into_iter().flatten() {
                println!("! {}", error);
            }
        }
    }
    Ok(Flow::Continue)
}

async fn kit_add(args: &[&str], handle: &StoreHandle) -> Result<Flow> {
    let [model_id, quantity] = args else {
        println!("usage: kit-add <model_id> <quantity>");
        return Ok(Flow::Continue);
    };
    let (Ok(model_id), Ok(quantity)) = (model_id.parse::<i64>(), quantity.parse::<u32>()) else {
        println!("! expected numeric model id and quantity");
        return Ok(Flow::Continue);
    };

    let state = handle.state();
    let Some(model) = state.models.results.get(&model_id).cloned() else {
        println!("! unknown model {} (run 'models' first)", model_id);
        return Ok(Flow::Continue);
    };
    let Some(brand) = state.brands.results.get(&model.brand_id).cloned() else {
        println!("! brand {} not loaded (run 'brands' first)", model.brand_id);
        return Ok(Flow::Continue);
    };

    handle
        .dispatch(KitModelsAction::CreateTemp {
            kit_model: KitModel {
                kit_id: None,
                brand_id: brand.brand_id,
                brand: brand.name,
                model_id: model.model_id,
                model: model.name,
                quantity,
            },
        })
        .await?;
    println!("Added to kit. Use 'kit-commit' to create the items.");
    Ok(Flow::Continue)
}

/// Submits the checklist being reviewed, as rent or return depending on
/// how the rental was started.
async fn submit(args: &[&str], handle: &StoreHandle) -> Result<Flow> {
    let state = handle.state();
    match state.rentals.kind {
        Some(RentalKind::Rent) => {
            let (Some(rented), expected) = parse_submit_dates(args) else {
                println!("usage: submit <rented YYYY-MM-DD> [expected-return YYYY-MM-DD]");
                return Ok(Flow::Continue);
            };
            handle
                .dispatch(LayoutAction::ShowLoadingMessage {
                    message: messages::RENTING_ITEMS.to_string(),
                })
                .await?;
            handle
                .dispatch(RentalsAction::Rent {
                    details: RentalDetails {
                        rented_date: rented,
                        expected_return_date: expected,
                    },
                })
                .await?;
        }
        Some(RentalKind::Return) => {
            let (Some(returned), _) = parse_submit_dates(args) else {
                println!("usage: submit <returned YYYY-MM-DD>");
                return Ok(Flow::Continue);
            };
            handle
                .dispatch(LayoutAction::ShowLoadingMessage {
                    message: messages::RETURNING_ITEMS.to_string(),
                })
                .await?;
            handle
                .dispatch(RentalsAction::Return {
                    returned_date: returned,
                })
                .await?;
        }
        None => println!("No rental in progress. Use: rent <barcode>"),
    }
    Ok(Flow::Continue)
}

fn parse_submit_dates(args: &[&str]) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let first = args.first().and_then(|arg| arg.parse().ok());
    let second = args.get(1).and_then(|arg| arg.parse().ok());
    (first, second)
}

/// Prints the outcome of actions the frontend would render, reading the
/// already updated state snapshot. Notifications are not handled here;
/// the notifier prints them when the effect runs.
fn print_event(action: &Action, handle: &StoreHandle) {
    match action {
        Action::Brands(BrandsAction::FetchSuccess { .. } | BrandsAction::Filter { .. }) => {
            let state = handle.state();
            let brands = selectors::filtered_brands(&state);
            println!("Brands ({}):", brands.len());
            for brand in &brands {
                println!("  [{}] {}", brand.brand_id, brand.name);
            }
            if selectors::show_add_new_brand(&state) {
                println!("  (new-brand <name> to add one)");
            }
        }
        Action::Models(ModelsAction::FetchSuccess { .. } | ModelsAction::Filter { .. }) => {
            let models = selectors::filtered_models(&handle.state());
            println!("Models ({}):", models.len());
            for model in &models {
                println!("  [{}] {} (brand {})", model.model_id, model.name, model.brand_id);
            }
        }
        Action::Categories(
            CategoriesAction::FetchSuccess { .. } | CategoriesAction::Filter { .. },
        ) => {
            let categories = selectors::filtered_categories(&handle.state());
            println!("Categories ({}):", categories.len());
            for category in &categories {
                println!("  [{}] {}", category.category_id, category.name);
            }
        }
        Action::Items(ItemsAction::FetchItemsSuccess { results }) => {
            println!("Items ({}):", results.len());
            for item in results {
                println!(
                    "  {} {} {} [{}] {}",
                    item.barcode,
                    item.brand,
                    item.model,
                    item.category,
                    if item.available { "available" } else { "rented" },
                );
            }
        }
        Action::Items(
            ItemsAction::FetchItemCustomFieldsSuccess { .. }
            | ItemsAction::FetchCustomFieldsByCategorySuccess { .. },
        ) => {
            let fields = selectors::item_custom_fields(&handle.state());
            println!("Custom fields ({}):", fields.len());
            for field in &fields {
                println!(
                    "  [{}] {} = {}",
                    field.custom_field_id,
                    field.name,
                    field.value.as_deref().unwrap_or("-"),
                );
            }
        }
        Action::KitModels(KitModelsAction::FetchSuccess { kit_id, results }) => {
            println!("Kit {} ({} models):", kit_id, results.len());
            for kit_model in results {
                println!(
                    "  {}x {} {}",
                    kit_model.quantity, kit_model.brand, kit_model.model
                );
            }
        }
        Action::Rentals(
            RentalsAction::StartRentalSuccess { .. } | RentalsAction::AddToRentalsSuccess { .. },
        ) => {
            print_checklist(&handle.state());
        }
        Action::App(AppAction::PushPage { screen }) => match screen {
            Screen::Rental { kind } => println!("-> rental checklist ({})", kind),
        },
        Action::App(AppAction::PopNav) => println!("<- back"),
        Action::App(AppAction::PopNavToRoot) => println!("<- home"),
        _ => {}
    }
}

fn print_checklist(state: &AppState) {
    let kind = match selectors::rental_kind(state) {
        Some(kind) => kind,
        None => {
            println!("No rental in progress.");
            return;
        }
    };
    let checklist = selectors::checklist(state);
    println!(
        "Checklist ({}, {:?}, {} items):",
        kind,
        selectors::rental_phase(state),
        checklist.len()
    );
    for item in &checklist {
        println!("  {} {} {}", item.barcode, item.brand, item.model);
    }
}

fn print_state(state: &AppState) {
    println!(
        "brands: {} fetched / models: {} / categories: {}",
        state.brands.results.len(),
        state.models.results.len(),
        state.categories.results.len()
    );
    println!(
        "items: {} fetched, {} in last result{}",
        state.items.results.len(),
        selectors::filtered_items(state).len(),
        if selectors::items_loading(state) {
            " (fetch running)"
        } else {
            ""
        }
    );
    println!(
        "kit in progress: {} models",
        selectors::temp_kit_models(state).len()
    );
    print_checklist(state);
    match selectors::loading_message(state) {
        Some(message) => println!("loading: {}", message),
        None => println!("loading: idle"),
    }
}

fn print_help() {
    println!("Account:");
    println!("  login <email> <password>    logout    whoami");
    println!("  account <first-name> <last-name>      update the profile");
    println!("  passwd <current> <new>                change the password");
    println!("Catalogs:");
    println!("  brands | models | categories          fetch a catalog");
    println!("  filter <brands|models|categories> [q] narrow the fetched list");
    println!("  new-brand <name>   new-model <brand_id> <name>   new-category <name>");
    println!("Items:");
    println!("  items                                 list items");
    println!("  fields <barcode>                      custom fields of an item");
    println!("  fields-for <category_id>              field definitions of a category");
    println!("  new-item <barcode> <brand_id> <model_id> <category_id>");
    println!("  delete-item <barcode>");
    println!("Kits:");
    println!("  kit <kit_id>   kit-add <model_id> <quantity>   kit-commit");
    println!("Rentals:");
    println!("  rent <barcode>     start a checklist for the scanned item");
    println!("  add <barcode>      add another item to the checklist");
    println!("  remove <barcode>   review   checklist");
    println!("  submit <date> [expected-return]       rent or return the checklist");
    println!("Other:");
    println!("  state   help   quit");
}
