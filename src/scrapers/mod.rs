pub mod sports247;
