mod helpers;
mod login_test;
