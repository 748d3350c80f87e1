//! Demonstration dataset loaded into a fresh store.

use chrono::{DateTime, Utc};

use crate::domain::{
    Category, EmptyCategoryName, LicenseTypeId, NewLicenseType, NewProduct, NewUser, Price,
    PriceValidationError, ProductId, UserId, UserValidationError,
};

use super::memory_store::{SequenceExhausted, Tables};

/// Errors raised while loading seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Sequence(#[from] SequenceExhausted),
    #[error("invalid seed user: {0}")]
    User(#[from] UserValidationError),
    #[error("invalid seed price: {0}")]
    Price(#[from] PriceValidationError),
    #[error("invalid seed category: {0}")]
    Category(#[from] EmptyCategoryName),
}

struct SeedUser {
    username: &'static str,
    password: &'static str,
    email: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    company: &'static str,
    is_admin: bool,
}

const USERS: [SeedUser; 2] = [
    SeedUser {
        username: "admin",
        password: "admin123",
        email: "admin@example.com",
        first_name: "Admin",
        last_name: "User",
        company: "License Marketplace Inc.",
        is_admin: true,
    },
    SeedUser {
        username: "user",
        password: "user123",
        email: "user@example.com",
        first_name: "Regular",
        last_name: "User",
        company: "Customer Company",
        is_admin: false,
    },
];

const CATEGORIES: [&str; 5] = [
    "Development Tools",
    "Database Software",
    "Cloud & DevOps",
    "Security Tools",
    "Business Software",
];

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    short_description: &'static str,
    price: f64,
    image_url: &'static str,
    category: &'static str,
    is_popular: bool,
    is_best_seller: bool,
    is_new: bool,
}

const PRODUCTS: [SeedProduct; 3] = [
    SeedProduct {
        name: "Developer Suite Pro",
        description: "Complete development toolkit with IDE, debugging tools, and advanced code \
                      completion. The Developer Suite Pro provides everything you need for \
                      professional software development across multiple platforms. This \
                      license includes 1 year of updates and priority technical support.",
        short_description: "Complete development toolkit with IDE, debugging tools, and \
                            advanced code completion.",
        price: 89.99,
        image_url: "https://images.unsplash.com/photo-1555952517-2e8e729e0b44",
        category: "Development Tools",
        is_popular: false,
        is_best_seller: true,
        is_new: false,
    },
    SeedProduct {
        name: "SQL Database Manager",
        description: "Powerful database management tool with visual query builder and \
                      performance analytics. Easily manage your database schemas, run \
                      optimized queries, and monitor performance metrics.",
        short_description: "Powerful database management tool with visual query builder and \
                            performance analytics.",
        price: 79.99,
        image_url: "https://images.unsplash.com/photo-1591017403725-fc69ef973fb7",
        category: "Database Software",
        is_popular: true,
        is_best_seller: false,
        is_new: false,
    },
    SeedProduct {
        name: "Cloud Deployment Suite",
        description: "Simplified cloud infrastructure management with integrated CI/CD \
                      pipelines and monitoring. Deploy applications to multiple cloud \
                      providers with ease and monitor performance in real-time.",
        short_description: "Simplified cloud infrastructure management with integrated CI/CD \
                            pipelines and monitoring.",
        price: 129.99,
        image_url: "https://images.unsplash.com/photo-1581291518633-83b4ebd1d83e",
        category: "Cloud & DevOps",
        is_popular: false,
        is_best_seller: false,
        is_new: true,
    },
];

struct SeedLicenseType {
    product_id: u32,
    name: &'static str,
    description: &'static str,
    price: f64,
    max_users: u32,
}

const LICENSE_TYPES: [SeedLicenseType; 6] = [
    SeedLicenseType {
        product_id: 1,
        name: "Single User",
        description: "For individual developers",
        price: 89.99,
        max_users: 1,
    },
    SeedLicenseType {
        product_id: 1,
        name: "Team License",
        description: "For teams up to 5 developers",
        price: 299.99,
        max_users: 5,
    },
    SeedLicenseType {
        product_id: 2,
        name: "Single User",
        description: "For individual database administrators",
        price: 79.99,
        max_users: 1,
    },
    SeedLicenseType {
        product_id: 2,
        name: "Team License",
        description: "For teams up to 5 database administrators",
        price: 199.99,
        max_users: 5,
    },
    SeedLicenseType {
        product_id: 3,
        name: "Single User",
        description: "For individual DevOps engineers",
        price: 129.99,
        max_users: 1,
    },
    SeedLicenseType {
        product_id: 3,
        name: "Team License",
        description: "For teams up to 5 DevOps engineers",
        price: 499.99,
        max_users: 5,
    },
];

/// Load the dataset into `tables`, allocating ids from their sequences.
pub(super) fn seed_tables(tables: &mut Tables, now: DateTime<Utc>) -> Result<(), SeedError> {
    for seed in &USERS {
        let mut user = NewUser::try_new(seed.username, seed.email, seed.password)?;
        user.first_name = Some(seed.first_name.to_owned());
        user.last_name = Some(seed.last_name.to_owned());
        user.company = Some(seed.company.to_owned());
        user.is_admin = seed.is_admin;
        let id = UserId::new(tables.sequences.users.advance()?);
        tables.users.insert(id, user.into_user(id, now));
    }

    for name in CATEGORIES {
        tables.categories.insert(Category::new(name)?);
    }

    for seed in &PRODUCTS {
        let product = NewProduct {
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            short_description: seed.short_description.to_owned(),
            price: Price::new(seed.price)?,
            image_url: seed.image_url.to_owned(),
            category: seed.category.to_owned(),
            is_popular: seed.is_popular,
            is_best_seller: seed.is_best_seller,
            is_new: seed.is_new,
        };
        let id = ProductId::new(tables.sequences.products.advance()?);
        tables.products.insert(id, product.into_product(id, now));
    }

    for seed in &LICENSE_TYPES {
        let license_type = NewLicenseType {
            product_id: ProductId::new(seed.product_id),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            price: Price::new(seed.price)?,
            max_users: Some(seed.max_users),
        };
        let id = LicenseTypeId::new(tables.sequences.license_types.advance()?);
        tables
            .license_types
            .insert(id, license_type.into_license_type(id));
    }

    Ok(())
}
