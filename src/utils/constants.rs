/// Backend de los builds debug cuando no hay override
pub const DEFAULT_DEVELOPMENT_URL: &str = "http://localhost:9000";

/// Backend de los builds release cuando no hay override
pub const DEFAULT_PRODUCTION_URL: &str = "https://mejia-vbams-production.up.railway.app";

/// Clave de localStorage con el token bearer
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Límite del lado del cliente para cada request
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Snapshots de dashboard más viejos que esto se recargan (10 minutos)
pub const DASHBOARD_CACHE_TTL_MS: i64 = 10 * 60 * 1000;

/// Cuántas entradas guardan las listas "recientes" del dashboard
pub const RECENT_ITEMS_LIMIT: usize = 5;
