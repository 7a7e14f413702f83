mod authentication;
mod cards;
mod wallets;
