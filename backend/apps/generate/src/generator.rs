//! File generation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use thiserror::Error;

use crate::naming::Names;
use crate::templates;

pub type GenerateResult<T> = Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid name {0:?}: use letters, digits and underscores, starting with a letter")]
    InvalidName(String),

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes scaffolding into a crate and the migrations directory
pub struct Generator {
    crate_dir: PathBuf,
    migrations_dir: PathBuf,
    env: Environment<'static>,
}

impl Generator {
    pub fn new(crate_dir: impl Into<PathBuf>, migrations_dir: impl Into<PathBuf>) -> GenerateResult<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template("migration.up", templates::MIGRATION_UP)?;
        env.add_template("migration.down", templates::MIGRATION_DOWN)?;
        env.add_template("usecase", templates::USECASE)?;
        env.add_template("repository", templates::REPOSITORY)?;
        env.add_template("entity", templates::ENTITY)?;

        Ok(Self {
            crate_dir: crate_dir.into(),
            migrations_dir: migrations_dir.into(),
            env,
        })
    }

    /// `<version>_<name>.up.sql` and `.down.sql`, versioned by `now`
    pub fn migration(&self, name: &str, now: DateTime<Utc>) -> GenerateResult<Vec<PathBuf>> {
        let names = Names::parse(name)?;
        let version = now.format("%Y%m%d%H%M%S");
        let up = self
            .migrations_dir
            .join(format!("{}_{}.up.sql", version, names.snake));
        let down = self
            .migrations_dir
            .join(format!("{}_{}.down.sql", version, names.snake));

        // Neither half is written if either exists
        for path in [&up, &down] {
            if path.exists() {
                return Err(GenerateError::AlreadyExists(path.clone()));
            }
        }

        self.write_new(&up, &self.render("migration.up", &names)?)?;
        self.write_new(&down, &self.render("migration.down", &names)?)?;
        Ok(vec![up, down])
    }

    pub fn usecase(&self, name: &str) -> GenerateResult<PathBuf> {
        let names = Names::parse(name)?;
        let path = self
            .crate_dir
            .join("src/application")
            .join(format!("{}.rs", names.snake));
        self.write_new(&path, &self.render("usecase", &names)?)?;
        Ok(path)
    }

    pub fn repository(&self, name: &str) -> GenerateResult<PathBuf> {
        let names = Names::parse(name)?;
        let path = self
            .crate_dir
            .join("src/infra")
            .join(format!("{}_repository.rs", names.snake));
        self.write_new(&path, &self.render("repository", &names)?)?;
        Ok(path)
    }

    pub fn entity(&self, name: &str) -> GenerateResult<PathBuf> {
        let names = Names::parse(name)?;
        let path = self
            .crate_dir
            .join("src/domain/entity")
            .join(format!("{}.rs", names.snake));
        self.write_new(&path, &self.render("entity", &names)?)?;
        Ok(path)
    }

    fn render(&self, template: &str, names: &Names) -> GenerateResult<String> {
        let rendered = self.env.get_template(template)?.render(context! {
            snake => names.snake.as_str(),
            pascal => names.pascal.as_str(),
            title => names.title.as_str(),
        })?;
        Ok(rendered)
    }

    /// Create `path` (and its parents); never truncates an existing file
    fn write_new(&self, path: &Path, content: &str) -> GenerateResult<()> {
        let io_err = |source| GenerateError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(GenerateError::AlreadyExists(path.to_path_buf()));
            }
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(content.as_bytes()).map_err(io_err)?;

        tracing::info!(path = %path.display(), "Created");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn generator(dir: &TempDir) -> Generator {
        Generator::new(dir.path().join("crate"), dir.path().join("migrations")).unwrap()
    }

    #[test]
    fn test_migration_pair() {
        let dir = TempDir::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();

        let paths = generator(&dir).migration("CreatePosts", now).unwrap();

        let migrations = dir.path().join("migrations");
        assert_eq!(
            paths,
            vec![
                migrations.join("20250304050607_create_posts.up.sql"),
                migrations.join("20250304050607_create_posts.down.sql"),
            ]
        );
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "-- Create Posts\n");
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "-- Revert Create Posts\n");
    }

    #[test]
    fn test_migration_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let generator = generator(&dir);
        let paths = generator.migration("create_posts", now).unwrap();
        fs::write(&paths[0], "CREATE TABLE posts ();").unwrap();

        let err = generator.migration("create_posts", now).unwrap_err();

        assert!(matches!(err, GenerateError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "CREATE TABLE posts ();");
    }

    #[test]
    fn test_usecase() {
        let dir = TempDir::new().unwrap();

        let path = generator(&dir).usecase("publish-post").unwrap();

        assert_eq!(path, dir.path().join("crate/src/application/publish_post.rs"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("//! Publish Post Use Case\n"));
        assert!(content.contains("pub struct PublishPostUseCase<R> {"));
        assert!(content.contains(
            "pub async fn execute(&self, input: PublishPostInput) -> AuthResult<PublishPostOutput> {"
        ));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_repository() {
        let dir = TempDir::new().unwrap();

        let path = generator(&dir).repository("Post").unwrap();

        assert_eq!(path, dir.path().join("crate/src/infra/post_repository.rs"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("#[trait_variant::make(PostRepository: Send)]"));
        assert!(content.contains("pub struct PgPostRepository {"));
        assert!(content.contains("/// PostgreSQL-backed post repository"));
    }

    #[test]
    fn test_entity() {
        let dir = TempDir::new().unwrap();

        let path = generator(&dir).entity("blog_post").unwrap();

        assert_eq!(path, dir.path().join("crate/src/domain/entity/blog_post.rs"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("pub struct BlogPost {"));
        assert!(content.contains("pub fn before_update(&mut self) {"));
    }

    #[test]
    fn test_existing_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let generator = generator(&dir);
        let path = generator.entity("post").unwrap();
        fs::write(&path, "// hand edited").unwrap();

        let err = generator.entity("Post").unwrap_err();

        assert!(matches!(err, GenerateError::AlreadyExists(p) if p == path));
        assert_eq!(fs::read_to_string(&path).unwrap(), "// hand edited");
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let dir = TempDir::new().unwrap();

        let err = generator(&dir).usecase("9lives").unwrap_err();

        assert!(matches!(err, GenerateError::InvalidName(_)));
        assert!(!dir.path().join("crate").exists());
    }
}
