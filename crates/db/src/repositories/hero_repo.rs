//! Repository for the single-row `hero_sections` table.

use sqlx::PgPool;

use crate::models::hero::{HeroSection, UpdateHeroSection};

const COLUMNS: &str = "id, welcome_text, title, subtitle, description, image_url, updated_at";

/// The only row the API reads or writes.
const HERO_ID: i64 = 1;

pub struct HeroRepo;

impl HeroRepo {
    pub async fn get(pool: &PgPool) -> Result<Option<HeroSection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_sections WHERE id = $1");
        sqlx::query_as::<_, HeroSection>(&query)
            .bind(HERO_ID)
            .fetch_optional(pool)
            .await
    }

    /// Update the hero row, recreating it if it was removed by hand.
    pub async fn update(pool: &PgPool, input: &UpdateHeroSection) -> Result<HeroSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_sections (id, welcome_text, title, subtitle, description, image_url) \
             VALUES ($1, NULLIF(BTRIM($2), ''), NULLIF(BTRIM($3), ''), NULLIF(BTRIM($4), ''), \
                     NULLIF(BTRIM($5), ''), NULLIF(BTRIM($6), '')) \
             ON CONFLICT (id) DO UPDATE SET \
                 welcome_text = NULLIF(BTRIM(COALESCE($2, hero_sections.welcome_text)), ''), \
                 title = NULLIF(BTRIM(COALESCE($3, hero_sections.title)), ''), \
                 subtitle = NULLIF(BTRIM(COALESCE($4, hero_sections.subtitle)), ''), \
                 description = NULLIF(BTRIM(COALESCE($5, hero_sections.description)), ''), \
                 image_url = NULLIF(BTRIM(COALESCE($6, hero_sections.image_url)), '') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroSection>(&query)
            .bind(HERO_ID)
            .bind(&input.welcome_text)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }
}
