mod cache;
mod http;
