//! # Seed Data Generator
//!
//! Populates a development database with reference data, partners and
//! sale history.
//!
//! ## Usage
//! ```bash
//! # Seed ./partnerdesk.db (or PARTNERDESK_DB_PATH)
//! cargo run -p partnerdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p partnerdesk-db --bin seed -- --db ./data/partnerdesk.db
//!
//! # More sale rows per partner
//! cargo run -p partnerdesk-db --bin seed -- --sales 12
//! ```
//!
//! ## Generated Data
//! - Product types with their coefficients
//! - Products with minimum costs
//! - Material types with defect percentages
//! - Partners of every legal form, one of them without any sales
//! - Sale rows spread over 2022-2024, sized so every discount tier shows up

use chrono::{Duration, NaiveDate};
use std::env;
use tracing::{info, warn};

use partnerdesk_core::sale_date::SALE_DATE_FORMAT;
use partnerdesk_core::{PartnerDetails, PartnerType};
use partnerdesk_db::{logging, Database, DbConfig};

/// (label, coefficient)
const PRODUCT_TYPES: &[(&str, f64)] = &[
    ("Ламинат", 2.35),
    ("Массивная доска", 5.15),
    ("Паркетная доска", 4.34),
    ("Пробковое покрытие", 1.5),
];

/// (name, product type index, minimum cost in kopecks)
const PRODUCTS: &[(&str, usize, i64)] = &[
    ("Паркетная доска Ясень темный однополосная 14 мм", 2, 445_690),
    ("Инженерная доска Дуб Французская елка однополосная 12 мм", 2, 744_990),
    ("Ламинат Дуб дымчато-белый 33 класс 12 мм", 0, 179_975),
    ("Ламинат Дуб серый 32 класс 8 мм с фаской", 0, 125_000),
    ("Пробковое напольное клеевое покрытие 32 класс 4 мм", 3, 450_000),
    ("Массивная доска Ясень натур 20 мм", 1, 612_350),
];

/// (label, defect percentage)
const MATERIAL_TYPES: &[(&str, f64)] = &[
    ("Тип материала 1", 0.10),
    ("Тип материала 2", 0.95),
    ("Тип материала 3", 0.28),
    ("Тип материала 4", 0.55),
    ("Тип материала 5", 0.34),
];

/// (type, name, director, phone, rating, email, legal address, total quantity to sell)
const PARTNERS: &[(PartnerType, &str, &str, &str, u32, &str, &str, i64)] = &[
    (
        PartnerType::Zao,
        "База Строитель",
        "Иванова Александра Ивановна",
        "493 123 45 67",
        7,
        "aleksandraivanova@ml.ru",
        "652050, Кемеровская область, город Юрга, ул. Лесная, 15",
        27_850,
    ),
    (
        PartnerType::Ooo,
        "Паркет 29",
        "Петров Василий Петрович",
        "987 123 56 78",
        7,
        "vppetrov@vl.ru",
        "164500, Архангельская область, город Северодвинск, ул. Строителей, 18",
        72_400,
    ),
    (
        PartnerType::Pao,
        "Стройсервис",
        "Соловьев Андрей Николаевич",
        "812 223 32 00",
        7,
        "ansolovev@st.ru",
        "188910, Ленинградская область, город Приморск, ул. Парковая, 21",
        305_000,
    ),
    (
        PartnerType::Oao,
        "Ремонт и отделка",
        "Воробьева Екатерина Валерьевна",
        "444 222 33 11",
        5,
        "ekaterina.vorobeva@ml.ru",
        "143960, Московская область, город Реутов, ул. Свободы, 51",
        8_200,
    ),
    (
        PartnerType::Ip,
        "МонтажПро",
        "Степанов Степан Сергеевич",
        "912 888 33 33",
        10,
        "stepanov@stepan.ru",
        "309500, Белгородская область, город Старый Оскол, ул. Рабочая, 122",
        0,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env();
    let mut sales_per_partner: i64 = 4;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales_per_partner = args[i + 1].parse().unwrap_or(4).max(1);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("PartnerDesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: PARTNERDESK_DB_PATH or ./partnerdesk.db)");
                println!("  -s, --sales <N>      Sale rows per partner (default: 4)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %config.database_path.display(), "Seeding database");
    let db = Database::new(config).await?;

    let existing = db.partners().count().await?;
    if existing > 0 {
        warn!(partners = existing, "Database already has partners, skipping seed");
        println!("Database already has {} partners; delete the file to regenerate.", existing);
        return Ok(());
    }

    let start = std::time::Instant::now();

    let mut type_ids = Vec::with_capacity(PRODUCT_TYPES.len());
    for &(label, coefficient) in PRODUCT_TYPES {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO product_types (label, coefficient) VALUES (?1, ?2) RETURNING id",
        )
        .bind(label)
        .bind(coefficient)
        .fetch_one(db.pool())
        .await?;
        type_ids.push(id);
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for &(name, type_index, min_cost_cents) in PRODUCTS {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, product_type_id, min_cost_cents) VALUES (?1, ?2, ?3) RETURNING id",
        )
        .bind(name)
        .bind(type_ids[type_index])
        .bind(min_cost_cents)
        .fetch_one(db.pool())
        .await?;
        product_ids.push(id);
    }

    for &(label, defect) in MATERIAL_TYPES {
        sqlx::query("INSERT INTO material_types (label, defect_percentage) VALUES (?1, ?2)")
            .bind(label)
            .bind(defect)
            .execute(db.pool())
            .await?;
    }

    let first_day = NaiveDate::from_ymd_opt(2022, 1, 10).ok_or("invalid seed start date")?;
    let mut sale_rows = 0;

    for (seed, &(partner_type, name, director, phone, rating, email, address, total)) in
        PARTNERS.iter().enumerate()
    {
        let details = PartnerDetails {
            partner_type,
            name: name.to_string(),
            director: director.to_string(),
            phone: phone.to_string(),
            rating,
            email: email.to_string(),
            legal_address: address.to_string(),
        };
        db.partners().add(&details).await?;

        let partner_id = db.sales().find_partner(name).await?.id;

        for (row, quantity) in split_quantity(total, sales_per_partner).into_iter().enumerate() {
            let product_id = product_ids[(seed + row) % product_ids.len()];
            let offset = ((seed * 97 + row * 211) % 1_000) as i64;
            let sale_date = (first_day + Duration::days(offset))
                .format(SALE_DATE_FORMAT)
                .to_string();

            sqlx::query(
                "INSERT INTO partner_products (partner_id, product_id, quantity, sale_date) VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(partner_id)
            .bind(product_id)
            .bind(quantity)
            .bind(sale_date)
            .execute(db.pool())
            .await?;
            sale_rows += 1;
        }
    }

    info!(
        partners = PARTNERS.len(),
        products = PRODUCTS.len(),
        materials = MATERIAL_TYPES.len(),
        sale_rows,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seed complete"
    );

    match db.partners().list_with_discount().await {
        Ok(listing) => {
            for standing in listing {
                println!(
                    "  {:>3}  {:<20} {:>8}  {:>2}%",
                    standing.partner.id,
                    standing.partner.name,
                    standing.total_quantity,
                    standing.discount().percent()
                );
            }
        }
        Err(e) if e.is_empty_state() => println!("  (no partners with sales)"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Splits `total` into `parts` positive quantities summing to `total`.
/// Zero yields no rows at all.
fn split_quantity(total: i64, parts: i64) -> Vec<i64> {
    if total <= 0 {
        return Vec::new();
    }
    let parts = parts.min(total);
    let base = total / parts;
    let remainder = total % parts;
    (0..parts)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}
